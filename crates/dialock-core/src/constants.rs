//! Core constants for the combination lock puzzle.
//!
//! This module defines the dial geometry, passcode shape and the default
//! pacing used by the telemetry monitor and the scripted command interpreter.
//!
//! # Dial Layout
//!
//! The dial shows one number at a time, from `0` to `DIAL_SIZE - 1`:
//!
//! ```text
//!          0
//!     15  [ ]  5
//!         10
//! ```
//!
//! Turning right increments the shown number, turning left decrements it.
//! Both directions wrap around.
//!
//! # Usage
//!
//! ```
//! use dialock_core::constants::*;
//!
//! fn is_on_dial(value: u32) -> bool {
//!     value < DIAL_SIZE as u32
//! }
//!
//! assert!(is_on_dial(19));
//! assert!(!is_on_dial(20));
//! assert_eq!(CODE_LENGTH, 3);
//! ```

// ============================================================================
// Dial Geometry
// ============================================================================

/// Number of positions on the dial.
///
/// Positions run from `0` to `DIAL_SIZE - 1`. Every derived passcode digit
/// and every recorded input digit falls in this range.
///
/// # Value: 20
pub const DIAL_SIZE: u8 = 20;

/// Number of digits in a passcode.
///
/// The input buffer never holds more than this many entries.
///
/// # Value: 3
pub const CODE_LENGTH: usize = 3;

// ============================================================================
// Timing Configuration
// ============================================================================

/// Default telemetry poll interval (milliseconds).
///
/// The telemetry monitor re-reads the telemetry source at this rate while
/// the puzzle is active.
///
/// # Value: 100ms
///
/// # Examples
///
/// ```
/// use dialock_core::constants::DEFAULT_POLL_INTERVAL_MS;
/// use std::time::Duration;
///
/// let interval = Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);
/// assert_eq!(interval.as_millis(), 100);
/// ```
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Default pause after each simulated press (milliseconds).
///
/// # Value: 100ms
pub const DEFAULT_PRESS_INTERVAL_MS: u64 = 100;

/// Default pause after a target digit has been reached (milliseconds).
///
/// # Value: 300ms
pub const DEFAULT_DIGIT_SETTLE_MS: u64 = 300;

/// Default pause after the interpreter resets a partially entered dial
/// (milliseconds).
///
/// # Value: 1000ms
pub const DEFAULT_RESET_SETTLE_MS: u64 = 1000;

/// Upper bound for any configured pause (milliseconds).
///
/// Longer pauses are rejected as configuration errors.
///
/// # Value: 60000ms (1 minute)
pub const MAX_INTERVAL_MS: u64 = 60_000;

// ============================================================================
// Command Surface
// ============================================================================

/// Keyword that introduces a scripted submission.
///
/// Matched case-insensitively: `submit 1 2 3` and `SUBMIT 1 2 3` are equivalent.
pub const SUBMIT_KEYWORD: &str = "submit";

// ============================================================================
// Logging
// ============================================================================

/// Default module name used as the log prefix.
///
/// Locks are numbered when created through the puzzle wrapper, producing
/// names such as `Combination Lock #1`.
pub const DEFAULT_MODULE_NAME: &str = "Combination Lock";
