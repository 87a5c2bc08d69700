//! Combination lock crate providing the dial state machine and the armed
//! puzzle built on top of it.
//!
//! This crate contains the recording rule that turns left/right presses into
//! entered digits, the solved check with its retry policy, and the puzzle
//! wrapper that talks to the host puzzle-runner.

pub mod controller;
pub mod dial;
pub mod input;
pub mod puzzle;
pub mod runner;

pub use controller::LockController;
pub use dial::DialState;
pub use input::{InputBuffer, InputTracker, TurnRecord};
pub use puzzle::{CombinationLock, LockConfig, LockStatus};
pub use runner::{PuzzleRunner, RecordingRunner, TracingRunner};
