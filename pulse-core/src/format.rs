//! Human-readable formatting for raw telemetry values.

use chrono::{DateTime, TimeZone};

/// Health classification shown as a badge next to a server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Online,
    Warning,
    Critical,
    Offline,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Online => "Online",
            Status::Warning => "Warning",
            Status::Critical => "Critical",
            Status::Offline => "Offline",
        }
    }
}

/// Megabytes to `"N MB"` / `"N.NN GB"`.
pub fn format_bytes_mb(mb: f64) -> String {
    if mb == 0.0 {
        return "0 MB".to_string();
    }
    if mb > 1024.0 {
        return format!("{:.2} GB", mb / 1024.0);
    }
    format!("{} MB", mb)
}

/// Seconds to `"{d}d {h}h {m}m"`. Leftover seconds are dropped.
pub fn format_uptime(seconds: f64) -> String {
    let s = seconds.max(0.0) as u64;
    let d = s / 86_400;
    let h = (s % 86_400) / 3600;
    let m = (s % 3600) / 60;
    format!("{}d {}h {}m", d, h, m)
}

/// Classify a server from its CPU and memory usage.
///
/// The Warning threshold is tested before the Critical one, so anything above
/// 90 reports Warning and Critical is never returned.
pub fn get_status(cpu_pct: f64, mem_pct: f64) -> Status {
    if cpu_pct > 90.0 || mem_pct > 90.0 {
        Status::Warning
    } else if cpu_pct > 98.0 || mem_pct > 98.0 {
        Status::Critical
    } else {
        Status::Online
    }
}

/// `HH:MM:SS` label for a metric sample.
pub fn time_label<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%H:%M:%S").to_string()
}
