//! Mock telemetry source for testing and development.
//!
//! This module provides a simulated puzzle host whose telemetry can be changed
//! programmatically, so monitor and solved-check behavior can be exercised
//! without a real host.

use crate::traits::TelemetrySource;
use dialock_core::TelemetrySnapshot;
use std::sync::{Arc, PoisonError, RwLock};

/// Mock telemetry source for testing and development.
///
/// The source serves whatever snapshot its [`MockTelemetryHandle`] last
/// stored. Tests and the console binary drive changes through the handle.
///
/// # Examples
///
/// ```
/// use dialock_core::TelemetrySnapshot;
/// use dialock_telemetry::{MockTelemetry, TelemetrySource};
///
/// let (source, handle) = MockTelemetry::new(TelemetrySnapshot::new(vec![1]).unwrap());
/// assert_eq!(source.solved_count(), 0);
///
/// handle.mark_solved();
/// handle.set_rotating_codes(vec![42, 17]);
///
/// assert_eq!(source.solved_count(), 1);
/// assert_eq!(source.rotating_codes(), vec![42, 17]);
/// ```
#[derive(Debug, Clone)]
pub struct MockTelemetry {
    /// Shared telemetry state
    state: Arc<RwLock<TelemetrySnapshot>>,
}

impl MockTelemetry {
    /// Create a new mock source serving `initial`.
    ///
    /// Returns a tuple of (MockTelemetry, MockTelemetryHandle) where the handle
    /// can be used to change the served telemetry.
    pub fn new(initial: TelemetrySnapshot) -> (Self, MockTelemetryHandle) {
        let state = Arc::new(RwLock::new(initial));

        let source = Self {
            state: Arc::clone(&state),
        };
        let handle = MockTelemetryHandle { state };

        (source, handle)
    }
}

impl TelemetrySource for MockTelemetry {
    fn snapshot(&self) -> TelemetrySnapshot {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Handle for changing the telemetry served by a [`MockTelemetry`].
///
/// Cloneable and shareable across tasks.
#[derive(Debug, Clone)]
pub struct MockTelemetryHandle {
    /// Shared telemetry state
    state: Arc<RwLock<TelemetrySnapshot>>,
}

impl MockTelemetryHandle {
    /// Replace the whole snapshot.
    pub fn replace(&self, snapshot: TelemetrySnapshot) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    /// Record one more puzzle solved elsewhere.
    ///
    /// Returns the new solved count.
    pub fn mark_solved(&self) -> u32 {
        self.update(|s| {
            let solved = s.solved_count().saturating_add(1);
            (s.with_solved_count(solved), solved)
        })
    }

    /// Set the solved count.
    pub fn set_solved_count(&self, solved_count: u32) {
        self.update(|s| (s.with_solved_count(solved_count), ()));
    }

    /// Set the rotating codes; an empty list switches derivation to the
    /// serial fallback.
    pub fn set_rotating_codes(&self, codes: Vec<u32>) {
        self.update(|s| (s.with_rotating_codes(codes), ()));
    }

    /// Set the battery count.
    pub fn set_battery_count(&self, battery_count: u32) {
        self.update(|s| (s.with_battery_count(battery_count), ()));
    }

    /// Get a copy of the snapshot currently served.
    pub fn current(&self) -> TelemetrySnapshot {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update<T>(&self, change: impl FnOnce(TelemetrySnapshot) -> (TelemetrySnapshot, T)) -> T {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let (next, result) = change(guard.clone());
        *guard = next;
        result
    }
}
