//! Pacing of scripted presses.

use dialock_core::constants::{
    DEFAULT_DIGIT_SETTLE_MS, DEFAULT_PRESS_INTERVAL_MS, DEFAULT_RESET_SETTLE_MS, MAX_INTERVAL_MS,
};
use dialock_core::{Error, Result};
use std::time::Duration;

/// Pauses the interpreter makes while dialing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressTiming {
    /// After every press.
    pub press: Duration,

    /// After a target digit has been reached.
    pub digit_settle: Duration,

    /// After resetting a partially entered dial.
    pub reset_settle: Duration,
}

impl PressTiming {
    /// Create a timing with validation.
    ///
    /// # Errors
    /// Returns `Error::Config` if any pause exceeds [`MAX_INTERVAL_MS`].
    pub fn new(press: Duration, digit_settle: Duration, reset_settle: Duration) -> Result<Self> {
        for (name, pause) in [
            ("press", press),
            ("digit settle", digit_settle),
            ("reset settle", reset_settle),
        ] {
            if pause > Duration::from_millis(MAX_INTERVAL_MS) {
                return Err(Error::Config(format!(
                    "{name} interval {}ms exceeds {MAX_INTERVAL_MS}ms",
                    pause.as_millis()
                )));
            }
        }

        Ok(Self {
            press,
            digit_settle,
            reset_settle,
        })
    }

    /// Scale every default pause by `factor`, e.g. `0.0` for instant replay.
    ///
    /// # Errors
    /// Returns `Error::Config` if `factor` is negative, not finite, or pushes a
    /// pause past [`MAX_INTERVAL_MS`].
    pub fn scaled(factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(Error::Config(format!("Invalid timing factor: {factor}")));
        }

        let defaults = Self::default();
        Self::new(
            defaults.press.mul_f64(factor),
            defaults.digit_settle.mul_f64(factor),
            defaults.reset_settle.mul_f64(factor),
        )
    }
}

impl Default for PressTiming {
    fn default() -> Self {
        Self {
            press: Duration::from_millis(DEFAULT_PRESS_INTERVAL_MS),
            digit_settle: Duration::from_millis(DEFAULT_DIGIT_SETTLE_MS),
            reset_settle: Duration::from_millis(DEFAULT_RESET_SETTLE_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let timing = PressTiming::default();
        assert_eq!(timing.press, Duration::from_millis(100));
        assert_eq!(timing.digit_settle, Duration::from_millis(300));
        assert_eq!(timing.reset_settle, Duration::from_secs(1));
    }

    #[test]
    fn test_rejects_long_pauses() {
        let result = PressTiming::new(
            Duration::from_millis(100),
            Duration::from_secs(61),
            Duration::from_secs(1),
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_scaled() {
        let instant = PressTiming::scaled(0.0).unwrap();
        assert_eq!(instant.reset_settle, Duration::ZERO);

        let double = PressTiming::scaled(2.0).unwrap();
        assert_eq!(double.digit_settle, Duration::from_millis(600));

        assert!(PressTiming::scaled(-1.0).is_err());
        assert!(PressTiming::scaled(f64::NAN).is_err());
        assert!(PressTiming::scaled(1_000.0).is_err());
    }
}
