//! Entered-digit recording.
//!
//! A digit is recorded only when the dial reverses direction, like a real
//! combination dial. The third digit is the exception: it is captured
//! automatically by the first right turn made while two digits are recorded.
//! This lets a full combination be entered with exactly two reversals.
//!
//! # Recording Rule
//!
//! ```text
//! turn left:   reversal? record position      then step left
//! turn right:  reversal? record position      then step right
//!              two digits recorded? record the new position
//! ```
//!
//! The automatic capture only fires on right turns. A player who keeps turning
//! left after two digits never records a third one.
//!
//! # Examples
//!
//! ```
//! use dialock_core::TurnDirection;
//! use dialock_lock::{DialState, InputTracker};
//!
//! let mut dial = DialState::new();
//! let mut tracker = InputTracker::new();
//!
//! tracker.turn(&mut dial, TurnDirection::Left);
//! tracker.turn(&mut dial, TurnDirection::Right);
//!
//! let entered: Vec<u8> = tracker.entered().iter().map(|p| p.as_u8()).collect();
//! assert_eq!(entered, vec![0, 19, 0]);
//! ```

use crate::dial::DialState;
use dialock_core::constants::CODE_LENGTH;
use dialock_core::{DialPosition, TurnDirection};
use serde::Serialize;
use tracing::trace;

/// Ordered entered digits, never more than [`CODE_LENGTH`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InputBuffer {
    entries: Vec<DialPosition>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(CODE_LENGTH),
        }
    }

    /// Append a digit if there is room.
    ///
    /// Returns `false` and leaves the buffer untouched when it is full.
    pub fn record(&mut self, position: DialPosition) -> bool {
        if self.is_full() {
            trace!(%position, "Input buffer full, digit not recorded");
            return false;
        }
        self.entries.push(position);
        true
    }

    /// Remove the third digit, if present.
    pub fn retract_third(&mut self) -> Option<DialPosition> {
        if self.entries.len() < CODE_LENGTH {
            return None;
        }
        Some(self.entries.remove(CODE_LENGTH - 1))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= CODE_LENGTH
    }

    pub fn entries(&self) -> &[DialPosition] {
        &self.entries
    }
}

/// What a single turn did to the dial and the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TurnRecord {
    /// Direction of the turn.
    pub direction: TurnDirection,

    /// Position before the turn.
    pub from: DialPosition,

    /// Position after the turn.
    pub to: DialPosition,

    /// Whether the turn reversed the previous direction.
    pub reversed: bool,

    /// Digit recorded because of the reversal (`from`), if there was room.
    pub recorded: Option<DialPosition>,

    /// Digit captured automatically as the third entry (`to`).
    pub auto_captured: Option<DialPosition>,
}

/// Applies the recording rule to turns of a [`DialState`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputTracker {
    buffer: InputBuffer,
}

impl InputTracker {
    pub fn new() -> Self {
        Self {
            buffer: InputBuffer::new(),
        }
    }

    /// Turn the dial one step and record digits per the recording rule.
    pub fn turn(&mut self, dial: &mut DialState, direction: TurnDirection) -> TurnRecord {
        let from = dial.position();
        let reversed = dial.is_reversal(direction);

        // The reversal digit is the reading before the step
        let recorded = (reversed && self.buffer.record(from)).then_some(from);

        let to = dial.rotate(direction);

        let auto_captured = (direction.is_right()
            && self.buffer.len() == CODE_LENGTH - 1
            && self.buffer.record(to))
        .then_some(to);

        TurnRecord {
            direction,
            from,
            to,
            reversed,
            recorded,
            auto_captured,
        }
    }

    /// Drop the third digit after a failed check.
    pub fn retract_third(&mut self) -> Option<DialPosition> {
        self.buffer.retract_third()
    }

    /// Forget every entered digit.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn buffer(&self) -> &InputBuffer {
        &self.buffer
    }

    pub fn entered(&self) -> &[DialPosition] {
        self.buffer.entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(tracker: &InputTracker) -> Vec<u8> {
        tracker.entered().iter().map(|p| p.as_u8()).collect()
    }

    fn turn_n(
        tracker: &mut InputTracker,
        dial: &mut DialState,
        direction: TurnDirection,
        n: usize,
    ) {
        for _ in 0..n {
            tracker.turn(dial, direction);
        }
    }

    #[test]
    fn test_buffer_caps_at_code_length() {
        let mut buffer = InputBuffer::new();
        for v in [1, 2, 3] {
            assert!(buffer.record(DialPosition::new(v).unwrap()));
        }
        assert!(buffer.is_full());
        assert!(!buffer.record(DialPosition::new(4).unwrap()));
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_buffer_retract_third() {
        let mut buffer = InputBuffer::new();
        buffer.record(DialPosition::new(1).unwrap());
        buffer.record(DialPosition::new(2).unwrap());
        assert_eq!(buffer.retract_third(), None);

        buffer.record(DialPosition::new(3).unwrap());
        assert_eq!(buffer.retract_third(), DialPosition::new(3).ok());
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_right_turns_without_reversal_record_nothing() {
        let mut dial = DialState::new();
        let mut tracker = InputTracker::new();

        turn_n(&mut tracker, &mut dial, TurnDirection::Right, 25);

        assert!(tracker.entered().is_empty());
        assert_eq!(dial.position().as_u8(), 5);
    }

    #[test]
    fn test_reversal_records_position_before_turn() {
        let mut dial = DialState::new();
        let mut tracker = InputTracker::new();

        turn_n(&mut tracker, &mut dial, TurnDirection::Right, 5);
        let record = tracker.turn(&mut dial, TurnDirection::Left);

        assert!(record.reversed);
        assert_eq!(record.recorded, DialPosition::new(5).ok());
        assert_eq!(record.to.as_u8(), 4);
        assert_eq!(values(&tracker), vec![5]);
    }

    #[test]
    fn test_left_then_right_from_fresh() {
        let mut dial = DialState::new();
        let mut tracker = InputTracker::new();

        let left = tracker.turn(&mut dial, TurnDirection::Left);
        assert_eq!(left.recorded, Some(DialPosition::ZERO));
        assert_eq!(left.to.as_u8(), 19);

        let right = tracker.turn(&mut dial, TurnDirection::Right);
        assert_eq!(right.recorded, DialPosition::new(19).ok());
        assert_eq!(right.auto_captured, Some(DialPosition::ZERO));

        assert_eq!(values(&tracker), vec![0, 19, 0]);
    }

    #[test]
    fn test_two_reversals_enter_full_code() {
        let mut dial = DialState::new();
        let mut tracker = InputTracker::new();

        // right to 5, left to 10, right to 15
        turn_n(&mut tracker, &mut dial, TurnDirection::Right, 5);
        turn_n(&mut tracker, &mut dial, TurnDirection::Left, 15);
        assert_eq!(values(&tracker), vec![5]);
        assert_eq!(dial.position().as_u8(), 10);

        let record = tracker.turn(&mut dial, TurnDirection::Right);
        assert_eq!(record.recorded, DialPosition::new(10).ok());
        assert_eq!(record.auto_captured, DialPosition::new(11).ok());
        assert_eq!(values(&tracker), vec![5, 10, 11]);
    }

    #[test]
    fn test_auto_capture_only_on_right_turns() {
        let mut dial = DialState::new();
        let mut tracker = InputTracker::new();

        tracker.turn(&mut dial, TurnDirection::Left); // records 0
        tracker.turn(&mut dial, TurnDirection::Right); // records 19, auto 0
        tracker.retract_third();
        assert_eq!(values(&tracker), vec![0, 19]);

        // Turning left records the reversal digit as the third entry
        let record = tracker.turn(&mut dial, TurnDirection::Left);
        assert_eq!(record.recorded, Some(DialPosition::ZERO));
        assert_eq!(values(&tracker), vec![0, 19, 0]);

        tracker.retract_third();
        // Further left turns never capture a third digit
        turn_n(&mut tracker, &mut dial, TurnDirection::Left, 30);
        assert_eq!(values(&tracker), vec![0, 19]);
    }

    #[test]
    fn test_full_buffer_ignores_reversals() {
        let mut dial = DialState::new();
        let mut tracker = InputTracker::new();

        tracker.turn(&mut dial, TurnDirection::Left);
        tracker.turn(&mut dial, TurnDirection::Right);
        assert_eq!(tracker.entered().len(), 3);

        let record = tracker.turn(&mut dial, TurnDirection::Left);
        assert!(record.reversed);
        assert_eq!(record.recorded, None);
        assert_eq!(tracker.entered().len(), 3);

        let record = tracker.turn(&mut dial, TurnDirection::Right);
        assert_eq!(record.auto_captured, None);
        assert_eq!(tracker.entered().len(), 3);
    }

    #[test]
    fn test_clear() {
        let mut dial = DialState::new();
        let mut tracker = InputTracker::new();

        tracker.turn(&mut dial, TurnDirection::Left);
        tracker.clear();
        assert!(tracker.buffer().is_empty());
    }
}
