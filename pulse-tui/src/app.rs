use std::time::{Duration, Instant};

use pulse_core::fixtures::{self, EndpointType, ENDPOINT_SERVERS, ENDPOINT_TYPES, SERVERS};
use pulse_core::{parse_report, Config, CsvTable, HttpSource, LiveMetrics, Poller, RemediationSection};
use tracing::{info, warn};

use crate::input::AppAction;

/// How long the remediation report shows "Processing" after the detail view opens.
pub const REPORT_DELAY: Duration = Duration::from_millis(3_000);
/// How long a CSV load shows "Processing" before the table appears.
pub const CSV_DELAY: Duration = Duration::from_millis(3_500);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Landing,
    Fleet,
    ServerDetail {
        id: &'static str,
        name: &'static str,
    },
    EndpointTypes,
    EndpointServers(&'static EndpointType),
}

impl View {
    pub fn title(&self) -> String {
        match self {
            View::Landing => "Home".into(),
            View::Fleet => "Servers".into(),
            View::ServerDetail { name, .. } => (*name).into(),
            View::EndpointTypes => "Endpoint types".into(),
            View::EndpointServers(t) => t.label.into(),
        }
    }

    /// Number of selectable rows, zero for views without a list.
    pub fn item_count(&self) -> usize {
        match self {
            View::Landing => LANDING_ENTRIES.len(),
            View::Fleet => SERVERS.len(),
            View::ServerDetail { .. } => 0,
            View::EndpointTypes => ENDPOINT_TYPES.len(),
            View::EndpointServers(_) => ENDPOINT_SERVERS.len(),
        }
    }

    fn child(&self, selected: usize) -> Option<View> {
        match self {
            View::Landing => match selected {
                0 => Some(View::Fleet),
                1 => Some(View::EndpointTypes),
                _ => None,
            },
            View::Fleet => SERVERS.get(selected).map(|s| View::ServerDetail {
                id: s.id,
                name: s.name,
            }),
            View::EndpointTypes => ENDPOINT_TYPES.get(selected).map(View::EndpointServers),
            View::EndpointServers(_) => ENDPOINT_SERVERS
                .get(selected)
                .map(|&(id, name)| View::ServerDetail { id, name }),
            View::ServerDetail { .. } => None,
        }
    }
}

/// `(label, blurb)` rows on the landing view.
pub const LANDING_ENTRIES: [(&str, &str); 2] = [
    ("Servers", "Fleet health at a glance, drill into live telemetry"),
    ("Endpoint types", "Traffic sources and the servers behind them"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailTab {
    Overview,
    Anomalies,
    BadRequests,
    Remediation,
}

impl DetailTab {
    pub const ALL: [DetailTab; 4] = [
        DetailTab::Overview,
        DetailTab::Anomalies,
        DetailTab::BadRequests,
        DetailTab::Remediation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DetailTab::Overview => "Overview",
            DetailTab::Anomalies => "Anomalies",
            DetailTab::BadRequests => "Bad requests",
            DetailTab::Remediation => "GenAI remediation",
        }
    }

    pub fn index(&self) -> usize {
        DetailTab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    fn step(&self, forward: bool) -> DetailTab {
        let n = DetailTab::ALL.len();
        let i = self.index();
        let next = if forward { (i + 1) % n } else { (i + n - 1) % n };
        DetailTab::ALL[next]
    }
}

#[derive(Clone, Debug)]
pub enum CsvState {
    Idle,
    Processing {
        since: Instant,
        outcome: Result<CsvTable, String>,
    },
    Loaded(CsvTable),
    Failed(String),
}

/// Everything owned by one open server detail view. Dropping it stops the poller.
pub struct Detail {
    pub id: &'static str,
    pub name: &'static str,
    pub poller: Option<Poller<HttpSource>>,
    pub opened: Instant,
    pub tab: DetailTab,
    pub scroll: u16,
    pub csv: CsvState,
    pub report: Vec<RemediationSection>,
}

impl Detail {
    pub fn metrics(&self) -> Option<LiveMetrics> {
        self.poller.as_ref().map(Poller::metrics)
    }

    pub fn report_ready(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.opened) >= REPORT_DELAY
    }
}

pub struct App {
    pub config: Config,
    pub view: View,
    pub selected: usize,
    history: Vec<(View, usize)>,
    pub detail: Option<Detail>,
    /// One-line notice shown in the footer.
    pub notice: Option<String>,
    pub quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            view: View::Landing,
            selected: 0,
            history: Vec::new(),
            detail: None,
            notice: None,
            quit: false,
        }
    }

    pub fn handle(&mut self, action: AppAction, now: Instant) {
        match action {
            AppAction::Quit => self.quit = true,
            AppAction::SelectPrev => self.selected = self.selected.saturating_sub(1),
            AppAction::SelectNext => {
                let n = self.view.item_count();
                if self.selected + 1 < n {
                    self.selected += 1;
                }
            }
            AppAction::Open => self.open(now),
            AppAction::Back => self.back(),
            AppAction::NextTab | AppAction::PrevTab => {
                if let Some(d) = self.detail.as_mut() {
                    d.tab = d.tab.step(matches!(action, AppAction::NextTab));
                    d.scroll = 0;
                }
            }
            AppAction::ScrollUp => {
                if let Some(d) = self.detail.as_mut() {
                    d.scroll = d.scroll.saturating_sub(1);
                }
            }
            AppAction::ScrollDown => {
                if let Some(d) = self.detail.as_mut() {
                    d.scroll = d.scroll.saturating_add(1);
                }
            }
            AppAction::LoadCsv => self.load_csv(now),
            AppAction::Noop => {}
        }
    }

    /// Promote a finished CSV "Processing" phase.
    pub fn tick(&mut self, now: Instant) {
        let Some(d) = self.detail.as_mut() else {
            return;
        };
        let ready = matches!(
            &d.csv,
            CsvState::Processing { since, .. } if now.saturating_duration_since(*since) >= CSV_DELAY
        );
        if !ready {
            return;
        }
        if let CsvState::Processing { outcome, .. } = std::mem::replace(&mut d.csv, CsvState::Idle) {
            d.csv = match outcome {
                Ok(table) => CsvState::Loaded(table),
                Err(msg) => CsvState::Failed(msg),
            };
        }
    }

    fn open(&mut self, now: Instant) {
        let Some(next) = self.view.child(self.selected) else {
            return;
        };
        self.history.push((self.view, self.selected));
        self.view = next;
        self.selected = 0;
        if let View::ServerDetail { id, name } = next {
            self.detail = Some(self.open_detail(id, name, now));
        }
    }

    fn open_detail(&mut self, id: &'static str, name: &'static str, now: Instant) -> Detail {
        let started = HttpSource::from_config(&self.config).and_then(|source| {
            info!(server = id, endpoint = source.endpoint(), "detail view opened");
            let mut poller = Poller::new(source);
            poller.start(self.config.poll_interval(), self.config.max_points)?;
            Ok(poller)
        });
        let poller = match started {
            Ok(poller) => Some(poller),
            Err(err) => {
                warn!(server = id, error = %err, "telemetry polling unavailable");
                self.notice = Some(format!("telemetry unavailable: {err}"));
                None
            }
        };
        Detail {
            id,
            name,
            poller,
            opened: now,
            tab: DetailTab::Overview,
            scroll: 0,
            csv: CsvState::Idle,
            report: parse_report(fixtures::REMEDIATION_REPORT),
        }
    }

    fn back(&mut self) {
        let Some((view, selected)) = self.history.pop() else {
            return;
        };
        if let Some(mut d) = self.detail.take() {
            if let Some(p) = d.poller.as_mut() {
                p.stop();
            }
            info!(server = d.id, "detail view closed");
        }
        self.view = view;
        self.selected = selected;
        self.notice = None;
    }

    fn load_csv(&mut self, now: Instant) {
        let Some(d) = self.detail.as_mut() else {
            return;
        };
        if matches!(d.csv, CsvState::Processing { .. }) {
            return;
        }
        let outcome = match &self.config.csv_path {
            Some(path) => CsvTable::load(path).map_err(|e| e.to_string()),
            None => Err("no CSV file configured (use --csv or PULSE_CSV)".to_string()),
        };
        if let Ok(table) = &outcome {
            info!(rows = table.len(), "csv loaded");
        }
        d.tab = DetailTab::BadRequests;
        d.csv = CsvState::Processing { since: now, outcome };
    }

    /// Breadcrumb from the landing view to the current one.
    pub fn breadcrumb(&self) -> String {
        self.history
            .iter()
            .map(|(v, _)| v.title())
            .chain(std::iter::once(self.view.title()))
            .collect::<Vec<_>>()
            .join(" / ")
    }
}
