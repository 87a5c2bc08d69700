//! Passcode derivation.
//!
//! The correct combination is never stored. It is derived on demand from a
//! [`TelemetrySnapshot`], so the answer moves whenever the telemetry does.
//!
//! # Algorithm
//!
//! ```text
//! rotating codes present?
//!   yes: c0 = sum(last digit of each code)   c1 = sum(first digit of each code)
//!   no:  c0 = last serial digit + solved     c1 = total modules
//!
//! c0 += batteries         c1 += solved
//! c0 %= 20                c1 %= 20
//! c2  = (c0 + c1) % 20
//! ```
//!
//! # Examples
//!
//! ```
//! use dialock_core::{PasscodeDeriver, TelemetrySnapshot};
//!
//! let snapshot = TelemetrySnapshot::new(vec![5, 1, 9])
//!     .unwrap()
//!     .with_rotating_codes(vec![42, 17])
//!     .with_battery_count(3)
//!     .with_solved_count(1);
//!
//! let code = PasscodeDeriver::derive(&snapshot);
//! assert_eq!(code.to_string(), "12 6 18");
//! ```

use crate::types::{DialPosition, PassCode, TelemetrySnapshot};

/// Stateless passcode deriver.
///
/// Same snapshot, same code: there is no internal state and no randomness.
pub struct PasscodeDeriver;

impl PasscodeDeriver {
    /// Derive the current passcode from a telemetry snapshot.
    ///
    /// Digits of each rotating code are taken from its decimal representation.
    /// Sums are widened to `u64` before reduction, so large counts cannot
    /// overflow.
    #[must_use]
    pub fn derive(snapshot: &TelemetrySnapshot) -> PassCode {
        let solved = u64::from(snapshot.solved_count());

        let (first, second) = if snapshot.rotating_codes().is_empty() {
            (
                u64::from(snapshot.last_serial_digit()) + solved,
                u64::from(snapshot.total_modules()),
            )
        } else {
            snapshot
                .rotating_codes()
                .iter()
                .fold((0u64, 0u64), |(last_sum, first_sum), &code| {
                    (
                        last_sum + u64::from(last_digit(code)),
                        first_sum + u64::from(first_digit(code)),
                    )
                })
        };

        let first = DialPosition::wrapping(first + u64::from(snapshot.battery_count()));
        let second = DialPosition::wrapping(second + solved);
        let third =
            DialPosition::wrapping(u64::from(first.as_u8()) + u64::from(second.as_u8()));

        PassCode::new([first, second, third])
    }
}

/// Least significant decimal digit.
fn last_digit(code: u32) -> u32 {
    code % 10
}

/// Most significant decimal digit.
fn first_digit(mut code: u32) -> u32 {
    while code >= 10 {
        code /= 10;
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn values(code: PassCode) -> [u8; 3] {
        let digits = code.digits();
        [digits[0].as_u8(), digits[1].as_u8(), digits[2].as_u8()]
    }

    #[rstest]
    #[case(0, 0, 0)]
    #[case(7, 7, 7)]
    #[case(42, 4, 2)]
    #[case(100, 1, 0)]
    #[case(907_213, 9, 3)]
    fn test_digit_extraction(#[case] code: u32, #[case] first: u32, #[case] last: u32) {
        assert_eq!(first_digit(code), first);
        assert_eq!(last_digit(code), last);
    }

    #[test]
    fn test_rotating_code_path() {
        let snapshot = TelemetrySnapshot::new(vec![5, 1, 9])
            .unwrap()
            .with_rotating_codes(vec![42, 17])
            .with_battery_count(3)
            .with_solved_count(1);

        assert_eq!(values(PasscodeDeriver::derive(&snapshot)), [12, 6, 18]);
    }

    #[test]
    fn test_serial_fallback_path() {
        let snapshot = TelemetrySnapshot::new(vec![5, 1, 9])
            .unwrap()
            .with_solved_count(2)
            .with_total_modules(11)
            .with_battery_count(1);

        assert_eq!(values(PasscodeDeriver::derive(&snapshot)), [12, 13, 5]);
    }

    #[test]
    fn test_reduction_of_large_sums() {
        // Six codes of 999_999: last digits sum to 54, first digits sum to 54
        let snapshot = TelemetrySnapshot::new(vec![0])
            .unwrap()
            .with_rotating_codes(vec![999_999; 6])
            .with_battery_count(6)
            .with_solved_count(27);

        // c0 = (54 + 6) % 20 = 0, c1 = (54 + 27) % 20 = 1, c2 = 1
        assert_eq!(values(PasscodeDeriver::derive(&snapshot)), [0, 1, 1]);
    }

    #[test]
    fn test_rotating_codes_ignore_serial_and_module_count() {
        let base = TelemetrySnapshot::new(vec![3])
            .unwrap()
            .with_rotating_codes(vec![581_204]);

        let other = TelemetrySnapshot::new(vec![8])
            .unwrap()
            .with_rotating_codes(vec![581_204])
            .with_total_modules(47);

        assert_eq!(
            PasscodeDeriver::derive(&base),
            PasscodeDeriver::derive(&other)
        );
    }

    #[test]
    fn test_derive_is_deterministic() {
        let snapshot = TelemetrySnapshot::new(vec![2, 7])
            .unwrap()
            .with_solved_count(4)
            .with_total_modules(11)
            .with_battery_count(5);

        let first = PasscodeDeriver::derive(&snapshot);
        for _ in 0..10 {
            assert_eq!(PasscodeDeriver::derive(&snapshot), first);
        }
    }
}
