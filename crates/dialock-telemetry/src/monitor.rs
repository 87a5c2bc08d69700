//! Background telemetry monitor.
//!
//! This module provides the [`TelemetryMonitor`], a cooperative task that
//! watches a [`TelemetrySource`] while the puzzle is active and reports a
//! freshly derived passcode whenever the inputs that move during play change.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐  poll every 100ms   ┌─────────────┐  CodeChanged  ┌──────────────┐
//! │ Telemetry  │────────────────────►│  Monitor    │──────────────►│ MonitorHandle│
//! │ Source     │                     │  Task       │               │ (mpsc)       │
//! └────────────┘                     └──────┬──────┘               └──────────────┘
//!                                           │ log lines
//!                                           ▼
//!                                     ┌──────────┐
//!                                     │ LogSink  │
//!                                     └──────────┘
//! ```
//!
//! Only the solved count and the rotating codes are compared between polls;
//! the serial, battery and module counts do not change during play.
//!
//! The monitor is observational. It never touches lock state, and the live
//! solved check derives its own code independently.
//!
//! # Lifecycle
//!
//! 1. Create the monitor with a source, a log sink and the puzzle's [`ActiveFlag`]
//! 2. Call [`TelemetryMonitor::start`] to spawn the polling task
//! 3. Receive [`MonitorEvent`]s from the returned [`MonitorHandle`] (optional)
//! 4. Clear the active flag; the task exits after its current pause

use crate::traits::{LogSink, TelemetrySource};
use chrono::{DateTime, Utc};
use dialock_core::constants::DEFAULT_POLL_INTERVAL_MS;
use dialock_core::{PassCode, PasscodeDeriver, TelemetrySnapshot};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

/// Capacity of the monitor event channel.
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Shared "puzzle is armed" flag.
///
/// Owned by the armed puzzle and cloned into the monitor, which only reads it.
#[derive(Debug, Clone, Default)]
pub struct ActiveFlag(Arc<AtomicBool>);

impl ActiveFlag {
    /// Create a flag with an initial value.
    pub fn new(active: bool) -> Self {
        Self(Arc::new(AtomicBool::new(active)))
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn set(&self, active: bool) {
        self.0.store(active, Ordering::Release);
    }
}

/// Configuration for the telemetry monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Pause between two telemetry reads.
    pub poll_interval: Duration,
}

impl MonitorConfig {
    /// Set the poll interval.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// A telemetry input that moved between two polls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "input", content = "value")]
pub enum TelemetryChange {
    /// New number of puzzles solved elsewhere.
    SolvedCount(u32),

    /// New rotating codes, in host order.
    RotatingCodes(Vec<u32>),
}

/// Report emitted by the monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "event")]
#[non_exhaustive]
pub enum MonitorEvent {
    /// Telemetry changed and the passcode was re-derived.
    CodeChanged {
        /// Code derived from the new telemetry.
        code: PassCode,

        /// Inputs that changed, solved count first.
        changes: Vec<TelemetryChange>,

        /// When the change was observed.
        observed_at: DateTime<Utc>,
    },
}

/// Compare the inputs that move during play.
fn diff(previous: &TelemetrySnapshot, current: &TelemetrySnapshot) -> Vec<TelemetryChange> {
    let mut changes = Vec::new();

    if previous.solved_count() != current.solved_count() {
        changes.push(TelemetryChange::SolvedCount(current.solved_count()));
    }

    if previous.rotating_codes() != current.rotating_codes() {
        changes.push(TelemetryChange::RotatingCodes(
            current.rotating_codes().to_vec(),
        ));
    }

    changes
}

/// Handle for a running telemetry monitor.
///
/// Holds the event stream and the task. Dropping the handle does not stop
/// the task; clear the [`ActiveFlag`] or call [`shutdown`](Self::shutdown).
pub struct MonitorHandle {
    /// Event receiver for code change reports.
    event_rx: mpsc::Receiver<MonitorEvent>,

    /// Running polling task.
    task: JoinHandle<()>,
}

impl MonitorHandle {
    /// Receive the next code change report.
    ///
    /// Returns `None` once the monitor task has exited and every buffered
    /// event has been received.
    pub async fn recv(&mut self) -> Option<MonitorEvent> {
        self.event_rx.recv().await
    }

    /// Take a buffered report without waiting.
    pub fn try_recv(&mut self) -> Option<MonitorEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Check whether the polling task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the polling task to exit on its own.
    ///
    /// The task exits after its current pause once the active flag is clear.
    pub async fn join(self) {
        if let Err(e) = self.task.await
            && e.is_panic()
        {
            warn!("Telemetry monitor task panicked: {}", e);
        }
    }

    /// Abort the polling task immediately.
    pub async fn shutdown(self) {
        self.task.abort();
        let _ = self.task.await;
    }
}

/// Polls a telemetry source while the puzzle is active.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use dialock_core::TelemetrySnapshot;
/// use dialock_telemetry::{ActiveFlag, MockTelemetry, MonitorConfig, TelemetryMonitor, TracingLog};
///
/// #[tokio::main]
/// async fn main() {
///     let (source, _handle) = MockTelemetry::new(TelemetrySnapshot::new(vec![1]).unwrap());
///     let active = ActiveFlag::new(true);
///
///     let monitor = TelemetryMonitor::new(
///         Arc::new(source),
///         Arc::new(TracingLog::new("Combination Lock #1")),
///         active.clone(),
///         MonitorConfig::default(),
///     )
///     .start();
///
///     active.set(false);
///     monitor.join().await;
/// }
/// ```
pub struct TelemetryMonitor {
    source: Arc<dyn TelemetrySource>,
    log: Arc<dyn LogSink>,
    active: ActiveFlag,
    config: MonitorConfig,
}

impl TelemetryMonitor {
    /// Create a new monitor.
    pub fn new(
        source: Arc<dyn TelemetrySource>,
        log: Arc<dyn LogSink>,
        active: ActiveFlag,
        config: MonitorConfig,
    ) -> Self {
        Self {
            source,
            log,
            active,
            config,
        }
    }

    /// Spawn the polling task and return its handle.
    ///
    /// The baseline snapshot is read before this method returns, so changes
    /// made right after `start` are reported. Must be called from within a
    /// Tokio runtime.
    pub fn start(self) -> MonitorHandle {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let baseline = self.source.snapshot();

        debug!(
            poll_interval_ms = self.config.poll_interval.as_millis() as u64,
            "Starting telemetry monitor"
        );

        let task = tokio::spawn(self.run(baseline, event_tx));

        MonitorHandle { event_rx, task }
    }

    async fn run(self, mut previous: TelemetrySnapshot, tx: mpsc::Sender<MonitorEvent>) {
        loop {
            tokio::time::sleep(self.config.poll_interval).await;

            if !self.active.is_active() {
                break;
            }

            let current = self.source.snapshot();
            let changes = diff(&previous, &current);
            if changes.is_empty() {
                trace!("Telemetry unchanged");
                continue;
            }

            let code = PasscodeDeriver::derive(&current);
            self.report(&code, &changes);

            let event = MonitorEvent::CodeChanged {
                code,
                changes,
                observed_at: Utc::now(),
            };
            match tx.try_send(event) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!("Monitor event channel full, dropping code change report");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    // Nobody listens for events; keep logging
                }
            }

            previous = current;
        }

        debug!("Telemetry monitor stopped");
    }

    fn report(&self, code: &PassCode, changes: &[TelemetryChange]) {
        for change in changes {
            match change {
                TelemetryChange::SolvedCount(solved) => {
                    self.log.log(&format!("Number of solved modules: {solved}"));
                }
                TelemetryChange::RotatingCodes(codes) => {
                    for rotating in codes {
                        self.log.log(&format!("Two Factor code changed: {rotating}"));
                    }
                }
            }
        }

        self.log.log(&format!("New solution: {code}"));
    }
}
