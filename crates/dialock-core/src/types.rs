use crate::{
    Result,
    constants::{CODE_LENGTH, DIAL_SIZE},
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A number shown on the dial (0-19).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct DialPosition(u8);

impl DialPosition {
    /// The position every fresh or reset dial starts at.
    pub const ZERO: DialPosition = DialPosition(0);

    /// Create a dial position with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidPosition` if the value is not below [`DIAL_SIZE`].
    pub fn new(value: u8) -> Result<Self> {
        if value >= DIAL_SIZE {
            return Err(Error::InvalidPosition {
                value: u32::from(value),
                size: DIAL_SIZE,
            });
        }
        Ok(DialPosition(value))
    }

    /// Reduce an arbitrary count onto the dial.
    #[must_use]
    pub fn wrapping(value: u64) -> Self {
        DialPosition((value % u64::from(DIAL_SIZE)) as u8)
    }

    /// Get the raw position as u8.
    #[must_use]
    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// The position one step to the right, wrapping `19 -> 0`.
    #[must_use]
    pub fn next(self) -> Self {
        if self.0 + 1 == DIAL_SIZE {
            DialPosition(0)
        } else {
            DialPosition(self.0 + 1)
        }
    }

    /// The position one step to the left, wrapping `0 -> 19`.
    #[must_use]
    pub fn previous(self) -> Self {
        if self.0 == 0 {
            DialPosition(DIAL_SIZE - 1)
        } else {
            DialPosition(self.0 - 1)
        }
    }
}

impl TryFrom<u8> for DialPosition {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        DialPosition::new(value)
    }
}

impl From<DialPosition> for u8 {
    fn from(position: DialPosition) -> Self {
        position.0
    }
}

impl fmt::Display for DialPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DialPosition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value: u32 = s
            .parse()
            .map_err(|_| Error::Config(format!("Invalid dial position: {s}")))?;
        let value = u8::try_from(value).map_err(|_| Error::InvalidPosition {
            value,
            size: DIAL_SIZE,
        })?;
        DialPosition::new(value)
    }
}

/// Direction of the last turn applied to the dial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnDirection {
    Left,
    /// Fresh and reset dials face right.
    #[default]
    Right,
}

impl TurnDirection {
    /// The other direction.
    #[inline]
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            TurnDirection::Left => TurnDirection::Right,
            TurnDirection::Right => TurnDirection::Left,
        }
    }

    /// Returns `true` if direction is Left.
    #[inline]
    #[must_use]
    pub fn is_left(self) -> bool {
        matches!(self, TurnDirection::Left)
    }

    /// Returns `true` if direction is Right.
    #[inline]
    #[must_use]
    pub fn is_right(self) -> bool {
        matches!(self, TurnDirection::Right)
    }
}

impl fmt::Display for TurnDirection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TurnDirection::Left => write!(f, "left"),
            TurnDirection::Right => write!(f, "right"),
        }
    }
}

/// The three-digit answer derived from telemetry.
///
/// A passcode is always recomputed from the current telemetry and never
/// stored between checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PassCode([DialPosition; CODE_LENGTH]);

impl PassCode {
    /// Create a passcode from three dial positions.
    #[must_use]
    pub fn new(digits: [DialPosition; CODE_LENGTH]) -> Self {
        PassCode(digits)
    }

    /// Create a passcode from raw values.
    ///
    /// # Errors
    /// Returns `Error::InvalidCodeLength` if `values` does not hold exactly
    /// three entries, or `Error::InvalidPosition` if any value is off the dial.
    pub fn from_values(values: &[u8]) -> Result<Self> {
        let digits: [u8; CODE_LENGTH] =
            values.try_into().map_err(|_| Error::InvalidCodeLength {
                expected: CODE_LENGTH,
                actual: values.len(),
            })?;
        Ok(PassCode([
            DialPosition::new(digits[0])?,
            DialPosition::new(digits[1])?,
            DialPosition::new(digits[2])?,
        ]))
    }

    /// Get the digits in entry order.
    #[must_use]
    pub fn digits(&self) -> &[DialPosition; CODE_LENGTH] {
        &self.0
    }

    /// Check entered digits against the code, entry by entry.
    ///
    /// Only the first three entries are compared; fewer than three never match.
    #[must_use]
    pub fn matches(&self, entered: &[DialPosition]) -> bool {
        entered.len() >= CODE_LENGTH && entered[..CODE_LENGTH] == self.0
    }
}

impl fmt::Display for PassCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.0[0], self.0[1], self.0[2])
    }
}

/// Immutable view of the external facts a passcode is derived from.
///
/// Snapshots are supplied by a telemetry source and are never mutated by the
/// lock. Values are trusted as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    rotating_codes: Vec<u32>,
    solved_count: u32,
    serial_digits: Vec<u8>,
    battery_count: u32,
    total_modules: u32,
}

impl TelemetrySnapshot {
    /// Create a snapshot with the given serial digits and every count at zero.
    ///
    /// # Errors
    /// Returns `Error::EmptySerial` if no serial digits are given, or
    /// `Error::InvalidSerialDigit` if any entry is not a decimal digit.
    pub fn new(serial_digits: Vec<u8>) -> Result<Self> {
        if serial_digits.is_empty() {
            return Err(Error::EmptySerial);
        }
        if let Some(&digit) = serial_digits.iter().find(|&&d| d > 9) {
            return Err(Error::InvalidSerialDigit(digit));
        }

        Ok(Self {
            rotating_codes: Vec::new(),
            solved_count: 0,
            serial_digits,
            battery_count: 0,
            total_modules: 0,
        })
    }

    /// Set the rotating auth codes currently shown.
    #[must_use]
    pub fn with_rotating_codes(mut self, codes: Vec<u32>) -> Self {
        self.rotating_codes = codes;
        self
    }

    /// Set the number of puzzles solved elsewhere.
    #[must_use]
    pub fn with_solved_count(mut self, solved_count: u32) -> Self {
        self.solved_count = solved_count;
        self
    }

    /// Set the battery count.
    #[must_use]
    pub fn with_battery_count(mut self, battery_count: u32) -> Self {
        self.battery_count = battery_count;
        self
    }

    /// Set the total number of modules.
    #[must_use]
    pub fn with_total_modules(mut self, total_modules: u32) -> Self {
        self.total_modules = total_modules;
        self
    }

    /// Rotating auth codes; empty when none are present.
    #[must_use]
    pub fn rotating_codes(&self) -> &[u32] {
        &self.rotating_codes
    }

    #[must_use]
    pub fn solved_count(&self) -> u32 {
        self.solved_count
    }

    /// Numeric digits of the serial identifier, in order. Never empty.
    #[must_use]
    pub fn serial_digits(&self) -> &[u8] {
        &self.serial_digits
    }

    #[must_use]
    pub fn battery_count(&self) -> u32 {
        self.battery_count
    }

    #[must_use]
    pub fn total_modules(&self) -> u32 {
        self.total_modules
    }

    /// Last digit of the serial identifier.
    #[must_use]
    pub fn last_serial_digit(&self) -> u8 {
        // Non-empty by construction
        self.serial_digits.last().copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", 0)]
    #[case("7", 7)]
    #[case("19", 19)]
    fn test_dial_position_valid(#[case] input: &str, #[case] expected: u8) {
        let position: DialPosition = input.parse().unwrap();
        assert_eq!(position.as_u8(), expected);
    }

    #[rstest]
    #[case("20")]
    #[case("300")]
    #[case("-1")]
    #[case("abc")]
    fn test_dial_position_invalid(#[case] input: &str) {
        let result: Result<DialPosition> = input.parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_dial_position_wraps() {
        assert_eq!(DialPosition::ZERO.previous().as_u8(), 19);
        assert_eq!(DialPosition::new(19).unwrap().next(), DialPosition::ZERO);
        assert_eq!(DialPosition::new(4).unwrap().next().as_u8(), 5);
        assert_eq!(DialPosition::new(4).unwrap().previous().as_u8(), 3);
        assert_eq!(DialPosition::wrapping(45).as_u8(), 5);
    }

    #[test]
    fn test_turn_direction() {
        assert_eq!(TurnDirection::default(), TurnDirection::Right);
        assert_eq!(TurnDirection::Left.opposite(), TurnDirection::Right);
        assert!(TurnDirection::Left.is_left());
        assert!(!TurnDirection::Left.is_right());
        assert_eq!(TurnDirection::Right.to_string(), "right");
    }

    #[test]
    fn test_passcode_from_values() {
        let code = PassCode::from_values(&[12, 6, 18]).unwrap();
        assert_eq!(code.to_string(), "12 6 18");

        assert!(matches!(
            PassCode::from_values(&[1, 2]),
            Err(Error::InvalidCodeLength {
                expected: 3,
                actual: 2
            })
        ));
        assert!(PassCode::from_values(&[1, 2, 20]).is_err());
    }

    #[test]
    fn test_passcode_matches() {
        let code = PassCode::from_values(&[5, 10, 15]).unwrap();
        let entered: Vec<DialPosition> = [5, 10, 15]
            .iter()
            .map(|&v| DialPosition::new(v).unwrap())
            .collect();

        assert!(code.matches(&entered));
        assert!(!code.matches(&entered[..2]));

        let wrong: Vec<DialPosition> = [5, 10, 14]
            .iter()
            .map(|&v| DialPosition::new(v).unwrap())
            .collect();
        assert!(!code.matches(&wrong));
    }

    #[test]
    fn test_snapshot_requires_serial() {
        assert_eq!(TelemetrySnapshot::new(vec![]), Err(Error::EmptySerial));
        assert_eq!(
            TelemetrySnapshot::new(vec![1, 12]),
            Err(Error::InvalidSerialDigit(12))
        );

        let snapshot = TelemetrySnapshot::new(vec![5, 1, 9])
            .unwrap()
            .with_battery_count(2);
        assert_eq!(snapshot.last_serial_digit(), 9);
        assert_eq!(snapshot.battery_count(), 2);
        assert!(snapshot.rotating_codes().is_empty());
    }

    #[test]
    fn test_dial_position_conversions() {
        assert_eq!(u8::from(DialPosition::new(7).unwrap()), 7);
        assert_eq!(DialPosition::try_from(19u8).unwrap().as_u8(), 19);
        assert!(DialPosition::try_from(21u8).is_err());
    }
}
