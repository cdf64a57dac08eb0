//! Pulse core: telemetry polling, rolling metric history and the formatting
//! used by the dashboard views.

pub mod client;
pub mod config;
pub mod csv;
pub mod error;
pub mod fixtures;
pub mod format;
pub mod model;
pub mod poller;
pub mod remediation;
pub mod series;

pub use client::{HttpSource, TelemetrySource};
pub use config::Config;
pub use csv::{parse_csv, CsvRow, CsvTable};
pub use error::{Error, FetchError, Result};
pub use format::{format_bytes_mb, format_uptime, get_status, Status};
pub use model::TelemetrySnapshot;
pub use poller::{LiveMetrics, Poller};
pub use remediation::{parse_report, Marker, RemediationSection, SectionBody};
pub use series::{MetricSample, MetricSeries};
