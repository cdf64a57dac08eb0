//! Live metrics poller.
//!
//! One ticker task fires every `interval` and spawns an independent fetch per
//! tick, so a slow endpoint never shifts the schedule and overlapping fetches
//! are all applied in completion order. Every fetch carries the poller's
//! cancellation token; the token is re-checked under the state lock before
//! anything is written, and `stop()` takes that same lock after cancelling,
//! so nothing is mutated once `stop()` returns.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::client::TelemetrySource;
use crate::config::DEFAULT_MAX_POINTS;
use crate::error::{Error, FetchError, Result};
use crate::fixtures::{
    fallback_snapshot, FALLBACK_CPU, FALLBACK_LATENCY, FALLBACK_MEMORY, FALLBACK_PROCESSES,
};
use crate::format::{get_status, time_label, Status};
use crate::model::TelemetrySnapshot;
use crate::series::{MetricSample, MetricSeries};

/// Seed points shown before the first poll lands: `(cpu, memory, latency, processes)`.
const SEED: [(f64, f64, f64, f64); 3] = [
    (20.0, 80.0, 10.0, 350.0),
    (30.0, 85.0, 15.0, 360.0),
    (25.0, 82.0, 12.0, 355.0),
];

/// Snapshot plus the four rolling series, owned by one poller.
#[derive(Clone, Debug)]
pub struct LiveMetrics {
    pub snapshot: TelemetrySnapshot,
    pub cpu: MetricSeries,
    pub memory: MetricSeries,
    pub latency: MetricSeries,
    pub processes: MetricSeries,
    pub successes: u64,
    pub failures: u64,
    pub last_error: Option<String>,
    /// Whether the most recent completed poll succeeded.
    pub live: bool,
}

impl LiveMetrics {
    /// Fallback snapshot and three seed points labeled now-4s, now-2s, now.
    pub fn seeded(max_points: usize, now: DateTime<Local>) -> Self {
        let labels = [
            time_label(&(now - TimeDelta::seconds(4))),
            time_label(&(now - TimeDelta::seconds(2))),
            time_label(&now),
        ];
        let series = |pick: fn(&(f64, f64, f64, f64)) -> f64| {
            MetricSeries::seeded(
                max_points,
                SEED.iter()
                    .zip(labels.iter())
                    .map(|(seed, label)| MetricSample::new(label.clone(), pick(seed))),
            )
        };
        Self {
            snapshot: fallback_snapshot(),
            cpu: series(|s| s.0),
            memory: series(|s| s.1),
            latency: series(|s| s.2),
            processes: series(|s| s.3),
            successes: 0,
            failures: 0,
            last_error: None,
            live: false,
        }
    }

    /// Replace the snapshot and append its values.
    pub fn record_success(&mut self, snapshot: TelemetrySnapshot, label: &str) {
        self.append(
            label,
            snapshot.cpu_percent(),
            snapshot.mem_percent(),
            snapshot.latency_ms(),
            snapshot.process_count() as f64,
        );
        self.snapshot = snapshot;
        self.successes += 1;
        self.live = true;
    }

    /// Keep the snapshot and append the static fallback values.
    pub fn record_failure(&mut self, err: &FetchError, label: &str) {
        self.append(
            label,
            FALLBACK_CPU,
            FALLBACK_MEMORY,
            FALLBACK_LATENCY,
            FALLBACK_PROCESSES as f64,
        );
        self.failures += 1;
        self.last_error = Some(err.to_string());
        self.live = false;
    }

    fn append(&mut self, label: &str, cpu: f64, memory: f64, latency: f64, processes: f64) {
        self.cpu.push(MetricSample::new(label, cpu));
        self.memory.push(MetricSample::new(label, memory));
        self.latency.push(MetricSample::new(label, latency));
        self.processes.push(MetricSample::new(label, processes));
    }

    pub fn status(&self) -> Status {
        get_status(self.snapshot.cpu_percent(), self.snapshot.mem_percent())
    }
}

pub struct Poller<S: TelemetrySource> {
    source: Arc<S>,
    state: Arc<Mutex<LiveMetrics>>,
    token: Option<CancellationToken>,
}

impl<S: TelemetrySource> Poller<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            state: Arc::new(Mutex::new(LiveMetrics::seeded(DEFAULT_MAX_POINTS, Local::now()))),
            token: None,
        }
    }

    /// Reseed the series with `max_points` capacity and begin polling.
    /// The first fetch fires immediately. Must be called inside a tokio runtime.
    ///
    /// A zero `interval` or `max_points` is rejected and leaves the poller stopped.
    pub fn start(&mut self, interval: Duration, max_points: usize) -> Result<()> {
        self.stop();
        if interval.is_zero() {
            return Err(Error::Config("poll interval must be non-zero".into()));
        }
        if max_points == 0 {
            return Err(Error::Config("max points must be non-zero".into()));
        }
        *lock(&self.state) = LiveMetrics::seeded(max_points, Local::now());

        let token = CancellationToken::new();
        self.token = Some(token.clone());
        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);

        info!(?interval, max_points, "poller started");
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // after a stall, keep fixed spacing from the late tick instead of bursting
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        tokio::spawn(poll_once(
                            Arc::clone(&source),
                            Arc::clone(&state),
                            token.clone(),
                        ));
                    }
                }
            }
            debug!("poll ticker exited");
        });
        Ok(())
    }

    /// Stop polling. In-flight fetches are abandoned and never applied.
    pub fn stop(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
            // wait out any apply that passed its token check before the cancel
            drop(lock(&self.state));
            info!("poller stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.token.is_some()
    }

    /// Consistent copy of the current state.
    pub fn metrics(&self) -> LiveMetrics {
        lock(&self.state).clone()
    }
}

impl<S: TelemetrySource> Drop for Poller<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_once<S: TelemetrySource>(
    source: Arc<S>,
    state: Arc<Mutex<LiveMetrics>>,
    token: CancellationToken,
) {
    let outcome = tokio::select! {
        biased;
        _ = token.cancelled() => return,
        outcome = source.fetch() => outcome,
    };

    let label = time_label(&Local::now());
    let mut metrics = lock(&state);
    if token.is_cancelled() {
        return;
    }
    match outcome {
        Ok(snapshot) => {
            debug!(cpu = snapshot.cpu_percent(), mem = snapshot.mem_percent(), "poll ok");
            metrics.record_success(snapshot, &label);
        }
        Err(err) => {
            warn!(error = %err, "poll failed, using fallback values");
            metrics.record_failure(&err, &label);
        }
    }
}

fn lock(state: &Mutex<LiveMetrics>) -> MutexGuard<'_, LiveMetrics> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
