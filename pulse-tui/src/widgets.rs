use std::time::Duration;

use pulse_core::fixtures::Severity;
use pulse_core::Status;
use ratatui::style::Color;

/// Usage meter, e.g. `[######....] 62%`. `pct` is 0..=100 and clamped.
pub fn meter(pct: f64, width: usize) -> String {
    let frac = (pct / 100.0).clamp(0.0, 1.0);
    let filled = (frac * width as f64).round() as usize;
    format!(
        "[{}{}] {:.0}%",
        "#".repeat(filled),
        ".".repeat(width.saturating_sub(filled)),
        pct
    )
}

/// Single-row trend line using block characters, scaled to the slice's own range.
/// Keeps the last `width` values and left-pads when there are fewer.
pub fn sparkline(values: &[f64], width: usize) -> String {
    const LEVELS: [char; 8] = [
        '\u{2581}', '\u{2582}', '\u{2583}', '\u{2584}', '\u{2585}', '\u{2586}', '\u{2587}',
        '\u{2588}',
    ];
    let slice = &values[values.len().saturating_sub(width)..];
    let lo = slice.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = slice.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = hi - lo;

    let mut out = " ".repeat(width - slice.len());
    for &v in slice {
        let level = if range > 0.0 {
            ((v - lo) / range * 7.0).round() as usize
        } else {
            3
        };
        out.push(LEVELS[level.min(7)]);
    }
    out
}

/// Aligned `key  value` rows.
pub fn key_value_lines(pairs: &[(&str, String)]) -> Vec<String> {
    let width = pairs.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    pairs
        .iter()
        .map(|(k, v)| format!("{k:<width$}  {v}"))
        .collect()
}

pub fn status_color(status: Status) -> Color {
    match status {
        Status::Online => Color::Green,
        Status::Warning => Color::Yellow,
        Status::Critical => Color::Red,
        Status::Offline => Color::DarkGray,
    }
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::High => Color::Red,
        Severity::Medium => Color::Yellow,
        Severity::Low => Color::Green,
    }
}

/// Usage color with the same thresholds the fleet cards use.
pub fn usage_color(pct: f64) -> Color {
    if pct > 90.0 {
        Color::Red
    } else if pct > 70.0 {
        Color::Yellow
    } else {
        Color::Green
    }
}

/// "Processing" with animated dots, advancing every 400ms.
pub fn processing(elapsed: Duration) -> String {
    let dots = (elapsed.as_millis() / 400 % 4) as usize;
    format!("Processing{}", ".".repeat(dots))
}

/// Cut `s` to at most `max` characters, marking the cut with `~`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('~');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meter_fills_and_clamps() {
        assert_eq!(meter(50.0, 10), "[#####.....] 50%");
        assert_eq!(meter(0.0, 4), "[....] 0%");
        assert_eq!(meter(140.0, 4), "[####] 140%");
    }

    #[test]
    fn sparkline_pads_and_scales() {
        let s = sparkline(&[0.0, 100.0], 4);
        assert_eq!(s.chars().count(), 4);
        assert!(s.starts_with("  "));
        assert!(s.ends_with("\u{2581}\u{2588}"));
        assert_eq!(sparkline(&[5.0; 3], 3), "\u{2584}".repeat(3));
        assert_eq!(sparkline(&[], 2), "  ");
    }

    #[test]
    fn key_values_align() {
        let lines = key_value_lines(&[("OS", "Linux".into()), ("Uptime", "3d".into())]);
        assert_eq!(lines, vec!["OS      Linux", "Uptime  3d"]);
    }

    #[test]
    fn processing_cycles() {
        assert_eq!(processing(Duration::from_millis(0)), "Processing");
        assert_eq!(processing(Duration::from_millis(1_250)), "Processing...");
        assert_eq!(processing(Duration::from_millis(1_600)), "Processing");
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("héllo wörld", 6), "héllo~");
        assert_eq!(truncate("short", 10), "short");
    }
}
