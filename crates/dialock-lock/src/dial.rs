//! Dial position and turn direction.

use dialock_core::{DialPosition, TurnDirection};
use serde::Serialize;

/// Current dial reading and the direction of the last turn.
///
/// A fresh dial shows `0` and faces right. Only [`rotate`](Self::rotate) and
/// [`reset`](Self::reset) change it.
///
/// # Examples
///
/// ```
/// use dialock_core::TurnDirection;
/// use dialock_lock::DialState;
///
/// let mut dial = DialState::new();
/// dial.rotate(TurnDirection::Left);
///
/// assert_eq!(dial.position().as_u8(), 19);
/// assert_eq!(dial.direction(), TurnDirection::Left);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DialState {
    position: DialPosition,
    direction: TurnDirection,
}

impl DialState {
    /// Create a dial at `0`, facing right.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> DialPosition {
        self.position
    }

    pub fn direction(&self) -> TurnDirection {
        self.direction
    }

    /// Check whether turning in `direction` reverses the last turn.
    pub fn is_reversal(&self, direction: TurnDirection) -> bool {
        self.direction != direction
    }

    /// Move one step in `direction`, wrapping at both ends.
    ///
    /// Returns the new position.
    pub fn rotate(&mut self, direction: TurnDirection) -> DialPosition {
        self.position = match direction {
            TurnDirection::Left => self.position.previous(),
            TurnDirection::Right => self.position.next(),
        };
        self.direction = direction;
        self.position
    }

    /// Return to `0`, facing right.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
