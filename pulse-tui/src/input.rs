use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::View;

/// Actions that the app can perform in response to input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    SelectPrev,
    SelectNext,
    Open,
    Back,

    // Server detail
    NextTab,
    PrevTab,
    ScrollUp,
    ScrollDown,
    LoadCsv,

    Noop,
}

/// Route a key event to an action based on the current view.
pub fn route(key: KeyEvent, view: &View) -> AppAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return AppAction::Quit;
    }

    match key.code {
        KeyCode::Char('q') => return AppAction::Quit,
        KeyCode::Esc | KeyCode::Backspace => return AppAction::Back,
        _ => {}
    }

    match view {
        View::ServerDetail { .. } => route_detail(key),
        _ => route_list(key),
    }
}

fn route_list(key: KeyEvent) -> AppAction {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => AppAction::SelectPrev,
        KeyCode::Down | KeyCode::Char('j') => AppAction::SelectNext,
        KeyCode::Enter => AppAction::Open,
        _ => AppAction::Noop,
    }
}

fn route_detail(key: KeyEvent) -> AppAction {
    match key.code {
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => AppAction::NextTab,
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => AppAction::PrevTab,
        KeyCode::Up | KeyCode::Char('k') => AppAction::ScrollUp,
        KeyCode::Down | KeyCode::Char('j') => AppAction::ScrollDown,
        KeyCode::Char('c') => AppAction::LoadCsv,
        _ => AppAction::Noop,
    }
}

/// Footer hint for the current view.
pub fn help(view: &View) -> &'static str {
    match view {
        View::ServerDetail { .. } => {
            " \u{2190}/\u{2192} tabs  \u{2191}/\u{2193} scroll  c load CSV  Esc back  q quit "
        }
        View::Landing => " \u{2191}/\u{2193} select  Enter open  q quit ",
        _ => " \u{2191}/\u{2193} select  Enter open  Esc back  q quit ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    const DETAIL: View = View::ServerDetail {
        id: "web-01",
        name: "Web Server 01",
    };

    #[test]
    fn ctrl_c_and_q_quit_everywhere() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for view in [View::Landing, View::Fleet, DETAIL] {
            assert_eq!(route(ctrl_c, &view), AppAction::Quit);
            assert_eq!(route(key(KeyCode::Char('q')), &view), AppAction::Quit);
        }
    }

    #[test]
    fn list_navigation() {
        assert_eq!(route(key(KeyCode::Char('j')), &View::Fleet), AppAction::SelectNext);
        assert_eq!(route(key(KeyCode::Up), &View::Fleet), AppAction::SelectPrev);
        assert_eq!(route(key(KeyCode::Enter), &View::Fleet), AppAction::Open);
        assert_eq!(route(key(KeyCode::Backspace), &View::Fleet), AppAction::Back);
        assert_eq!(route(key(KeyCode::Char('c')), &View::Fleet), AppAction::Noop);
    }

    #[test]
    fn detail_keys() {
        assert_eq!(route(key(KeyCode::Char('c')), &DETAIL), AppAction::LoadCsv);
        assert_eq!(route(key(KeyCode::Tab), &DETAIL), AppAction::NextTab);
        assert_eq!(route(key(KeyCode::Left), &DETAIL), AppAction::PrevTab);
        assert_eq!(route(key(KeyCode::Down), &DETAIL), AppAction::ScrollDown);
        assert_eq!(route(key(KeyCode::Esc), &DETAIL), AppAction::Back);
        assert_eq!(route(key(KeyCode::Enter), &DETAIL), AppAction::Noop);
    }
}
