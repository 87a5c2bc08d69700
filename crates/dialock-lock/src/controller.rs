//! Dial controller and solved check.
//!
//! [`LockController`] owns the dial and the entered digits and answers the
//! question "is the lock open right now?" against live telemetry.
//!
//! # Retry Policy
//!
//! The solved check compares the three entered digits with a passcode derived
//! fresh from telemetry. On a mismatch only the third digit is dropped, so the
//! player can keep turning right to try another third digit without
//! re-entering the first two.
//!
//! ```text
//! entered [5, 10, 11]   code 5 10 15   -> mismatch, entered [5, 10]
//! turn right (auto-capture)            -> entered [5, 10, 12]
//! ...
//! entered [5, 10, 15]   code 5 10 15   -> solved
//! ```
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use dialock_core::TelemetrySnapshot;
//! use dialock_lock::LockController;
//! use dialock_telemetry::MockTelemetry;
//!
//! // serial [5], ten modules: code 5 10 15
//! let snapshot = TelemetrySnapshot::new(vec![5]).unwrap().with_total_modules(10);
//! let (source, _handle) = MockTelemetry::new(snapshot);
//! let mut lock = LockController::new(Arc::new(source));
//!
//! for _ in 0..5 { lock.turn_right(); }
//! for _ in 0..15 { lock.turn_left(); }
//! lock.turn_right();
//! assert!(!lock.solved());
//!
//! // Each failed check frees the third slot for the next right turn
//! for _ in 0..4 { lock.turn_right(); lock.solved(); }
//! assert!(lock.solved());
//! ```

use crate::dial::DialState;
use crate::input::{InputTracker, TurnRecord};
use dialock_core::constants::CODE_LENGTH;
use dialock_core::{DialPosition, PassCode, PasscodeDeriver, TurnDirection};
use dialock_telemetry::TelemetrySource;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Dial state machine bound to a telemetry source.
pub struct LockController {
    dial: DialState,
    tracker: InputTracker,
    telemetry: Arc<dyn TelemetrySource>,
}

impl LockController {
    /// Create a fresh controller: dial at `0`, facing right, nothing entered.
    pub fn new(telemetry: Arc<dyn TelemetrySource>) -> Self {
        Self {
            dial: DialState::new(),
            tracker: InputTracker::new(),
            telemetry,
        }
    }

    /// Turn the dial one step to the left.
    pub fn turn_left(&mut self) -> TurnRecord {
        self.turn(TurnDirection::Left)
    }

    /// Turn the dial one step to the right.
    pub fn turn_right(&mut self) -> TurnRecord {
        self.turn(TurnDirection::Right)
    }

    /// Turn the dial one step in `direction`.
    pub fn turn(&mut self, direction: TurnDirection) -> TurnRecord {
        self.tracker.turn(&mut self.dial, direction)
    }

    /// Return the dial to `0` facing right and forget every entered digit.
    pub fn reset(&mut self) {
        self.dial.reset();
        self.tracker.clear();
    }

    /// Check the entered digits against the current passcode.
    ///
    /// Returns `false` without side effects while fewer than three digits are
    /// entered. On a mismatch the third digit is dropped; the first two are
    /// kept. A match leaves the buffer untouched.
    pub fn solved(&mut self) -> bool {
        if self.tracker.entered().len() < CODE_LENGTH {
            return false;
        }

        let code = self.current_code();
        if code.matches(self.tracker.entered()) {
            return true;
        }

        if let Some(dropped) = self.tracker.retract_third() {
            debug!(%dropped, expected = %code, "Wrong combination, dropping third digit");
        }
        false
    }

    /// Derive the passcode from the telemetry as it is right now.
    pub fn current_code(&self) -> PassCode {
        PasscodeDeriver::derive(&self.telemetry.snapshot())
    }

    pub fn position(&self) -> DialPosition {
        self.dial.position()
    }

    pub fn direction(&self) -> TurnDirection {
        self.dial.direction()
    }

    /// Digits entered so far, oldest first.
    pub fn entered(&self) -> &[DialPosition] {
        self.tracker.entered()
    }

    pub fn telemetry(&self) -> &Arc<dyn TelemetrySource> {
        &self.telemetry
    }
}

impl fmt::Debug for LockController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockController")
            .field("dial", &self.dial)
            .field("tracker", &self.tracker)
            .finish_non_exhaustive()
    }
}
