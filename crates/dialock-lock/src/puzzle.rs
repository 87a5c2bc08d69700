//! Armed combination-lock puzzle.
//!
//! [`CombinationLock`] wraps a [`LockController`] with the host-facing
//! surface: arming, the per-tick solved check, the three press buttons and a
//! status snapshot. It owns the [`ActiveFlag`] and shares it read-only with
//! the telemetry monitor it spawns on arming.
//!
//! # Lifecycle
//!
//! ```text
//! new ──activate()──► active ──update() sees solved──► solved
//!                       │                                (monitor exits)
//!                       └── press_left / press_right / press_reset
//! ```
//!
//! Presses are accepted in every state. Only an armed lock checks the
//! combination.

use crate::controller::LockController;
use crate::runner::PuzzleRunner;
use dialock_core::constants::DEFAULT_MODULE_NAME;
use dialock_core::{DialPosition, PassCode, TurnDirection};
use dialock_telemetry::{
    ActiveFlag, LogSink, MonitorConfig, MonitorHandle, TelemetryMonitor, TelemetrySource,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::Mutex;
use tracing::debug;

/// Source of the `#n` suffix in numbered module names.
static NEXT_MODULE_ID: AtomicU32 = AtomicU32::new(1);

/// Configuration for a [`CombinationLock`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockConfig {
    /// Log-friendly module name, e.g. `Combination Lock #1`.
    pub name: String,

    /// Telemetry monitor settings.
    pub monitor: MonitorConfig,
}

impl LockConfig {
    /// Configuration named `Combination Lock #n`, numbered in creation order.
    pub fn numbered() -> Self {
        let id = NEXT_MODULE_ID.fetch_add(1, Ordering::Relaxed);
        Self::default().with_name(format!("{DEFAULT_MODULE_NAME} #{id}"))
    }

    /// Set the module name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the monitor configuration.
    pub fn with_monitor(mut self, monitor: MonitorConfig) -> Self {
        self.monitor = monitor;
        self
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODULE_NAME.to_string(),
            monitor: MonitorConfig::default(),
        }
    }
}

/// Point-in-time view of a lock, for hosts that render the dial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockStatus {
    pub position: DialPosition,
    pub direction: TurnDirection,
    pub entered: Vec<DialPosition>,
    pub active: bool,
}

/// Combination lock puzzle module.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use dialock_core::TelemetrySnapshot;
/// use dialock_lock::{CombinationLock, LockConfig, RecordingRunner};
/// use dialock_telemetry::MockTelemetry;
///
/// #[tokio::main]
/// async fn main() {
///     let snapshot = TelemetrySnapshot::new(vec![5]).unwrap().with_total_modules(10);
///     let (source, _handle) = MockTelemetry::new(snapshot);
///     let runner = Arc::new(RecordingRunner::new());
///
///     let mut lock = CombinationLock::new(
///         Arc::new(source),
///         runner.clone(),
///         LockConfig::default().with_name("Combination Lock #1"),
///     );
///     lock.activate();
///
///     assert!(runner.contains("Initial solution: 5 10 15"));
///     assert!(lock.is_active());
/// }
/// ```
pub struct CombinationLock {
    controller: LockController,
    active: ActiveFlag,
    solved: bool,
    runner: Arc<dyn PuzzleRunner>,
    config: LockConfig,
    monitor: Option<MonitorHandle>,
    command_gate: Arc<Mutex<()>>,
}

impl CombinationLock {
    /// Create an unarmed lock with a fresh dial.
    pub fn new(
        telemetry: Arc<dyn TelemetrySource>,
        runner: Arc<dyn PuzzleRunner>,
        config: LockConfig,
    ) -> Self {
        Self {
            controller: LockController::new(telemetry),
            active: ActiveFlag::new(false),
            solved: false,
            runner,
            config,
            monitor: None,
            command_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Arm the puzzle.
    ///
    /// Sets the lock active, logs the initial solution and spawns the
    /// telemetry monitor. Does nothing if the lock is already active or
    /// solved. Must be called from within a Tokio runtime.
    pub fn activate(&mut self) {
        if self.active.is_active() || self.solved {
            debug!(module = %self.config.name, "Lock already armed");
            return;
        }

        self.active.set(true);

        let code = self.controller.current_code();
        self.runner.log(&format!("Initial solution: {code}"));

        let log: Arc<dyn LogSink> = self.runner.clone();
        let monitor = TelemetryMonitor::new(
            Arc::clone(self.controller.telemetry()),
            log,
            self.active.clone(),
            self.config.monitor.clone(),
        );
        self.monitor = Some(monitor.start());
    }

    /// Run the per-tick solved check.
    ///
    /// Returns `true` on the tick the lock opens. Inactive locks are not
    /// checked, so their entered digits are never touched here.
    pub fn update(&mut self) -> bool {
        if !self.active.is_active() || !self.controller.solved() {
            return false;
        }

        self.active.set(false);
        self.solved = true;
        self.runner.report_solved();
        self.runner.log("Module solved");
        true
    }

    /// Left button: turn the dial one step to the left.
    pub fn press_left(&mut self) {
        let record = self.controller.turn_left();
        if record.reversed {
            self.runner.log(&format!("Turned left to: {}", record.from));
        }
    }

    /// Right button: turn the dial one step to the right.
    pub fn press_right(&mut self) {
        let record = self.controller.turn_right();
        if record.reversed {
            self.runner.log(&format!("Turned right to: {}", record.from));
        }
    }

    /// Reset button: dial back to `0`, entered digits cleared.
    pub fn press_reset(&mut self) {
        self.controller.reset();
        self.runner.log("Pressed reset");
    }

    /// Press the button for `direction`.
    pub fn press(&mut self, direction: TurnDirection) {
        match direction {
            TurnDirection::Left => self.press_left(),
            TurnDirection::Right => self.press_right(),
        }
    }

    pub fn status(&self) -> LockStatus {
        LockStatus {
            position: self.controller.position(),
            direction: self.controller.direction(),
            entered: self.controller.entered().to_vec(),
            active: self.active.is_active(),
        }
    }

    /// Passcode derived from the telemetry as it is right now.
    pub fn current_code(&self) -> PassCode {
        self.controller.current_code()
    }

    /// Take the monitor handle to receive its change reports.
    ///
    /// Returns `None` before arming or once taken.
    pub fn take_monitor(&mut self) -> Option<MonitorHandle> {
        self.monitor.take()
    }

    /// Gate that serializes scripted command runs on this lock.
    pub fn command_gate(&self) -> Arc<Mutex<()>> {
        Arc::clone(&self.command_gate)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_active()
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn position(&self) -> DialPosition {
        self.controller.position()
    }

    pub fn entered(&self) -> &[DialPosition] {
        self.controller.entered()
    }

    pub fn controller(&self) -> &LockController {
        &self.controller
    }
}

impl Drop for CombinationLock {
    fn drop(&mut self) {
        // Lets a still-running monitor exit after its current pause
        self.active.set(false);
    }
}
