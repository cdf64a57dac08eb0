mod app;
mod input;
mod ui;
mod widgets;

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use pulse_core::Config;
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::App;

/// Terminal dashboard for server fleet health.
#[derive(Parser, Debug)]
#[command(name = "pulse", version, about)]
struct Cli {
    /// Telemetry healthcheck URL
    #[arg(long, env = "PULSE_ENDPOINT")]
    endpoint: Option<String>,

    /// Poll interval in milliseconds
    #[arg(long = "interval-ms", env = "PULSE_POLL_MS")]
    interval_ms: Option<u64>,

    /// Samples kept per chart
    #[arg(long, env = "PULSE_MAX_POINTS")]
    max_points: Option<usize>,

    /// HTTP request timeout in milliseconds
    #[arg(long = "timeout-ms", env = "PULSE_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// Bad-request CSV loaded with `c` in the server view
    #[arg(long, env = "PULSE_CSV")]
    csv: Option<PathBuf>,

    /// Log file (defaults to pulse.log in the temp dir)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply(&self, cfg: &mut Config) {
        if let Some(v) = &self.endpoint {
            cfg.endpoint = v.clone();
        }
        if let Some(v) = self.interval_ms {
            cfg.poll_interval_ms = v;
        }
        if let Some(v) = self.max_points {
            cfg.max_points = v;
        }
        if let Some(v) = self.timeout_ms {
            cfg.request_timeout_ms = v;
        }
        if let Some(v) = &self.csv {
            cfg.csv_path = Some(v.clone());
        }
    }
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env("PULSE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("pulse.log"));
    init_logging(&log_path)?;

    let mut config = Config::from_env()?;
    cli.apply(&mut config);
    config.validate()?;
    info!(endpoint = %config.endpoint, interval_ms = config.poll_interval_ms, "starting");

    // pollers spawn onto this runtime while the UI loop owns the main thread
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("pulse-poll")
        .enable_all()
        .build()
        .context("building tokio runtime")?;
    let _guard = rt.enter();

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let result = run(&mut terminal, App::new(config));

    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    info!("exited");
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> anyhow::Result<()> {
    let frame_rate = Duration::from_millis(250);

    while !app.quit {
        let now = Instant::now();
        app.tick(now);
        terminal.draw(|f| ui::draw(f, &app, now))?;

        if event::poll(frame_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let action = input::route(key, &app.view);
                    app.handle(action, Instant::now());
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "pulse",
            "--endpoint",
            "http://localhost:3010/healthcheck",
            "--interval-ms",
            "500",
            "--csv",
            "bad.csv",
        ]);
        let mut cfg = Config::default();
        cli.apply(&mut cfg);
        assert_eq!(cfg.endpoint, "http://localhost:3010/healthcheck");
        assert_eq!(cfg.poll_interval_ms, 500);
        assert_eq!(cfg.max_points, 30);
        assert_eq!(cfg.csv_path, Some(PathBuf::from("bad.csv")));
    }
}
