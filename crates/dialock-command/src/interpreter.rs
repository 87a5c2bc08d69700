//! Scripted command interpreter.
//!
//! [`CommandInterpreter`] replays a `submit` command as button presses on a
//! shared [`CombinationLock`], pausing between presses like a player would.
//!
//! # Dialing
//!
//! ```text
//! entered digits?  press reset, wait reset-settle
//! for each digit, directions right, left, right:
//!     press once, wait
//!     press and wait until the dial shows the digit
//!     wait digit-settle
//! ```
//!
//! The lock mutex is held only for a single press, so the host keeps ticking
//! the lock while a run is in flight. Each press is preceded by a tick of the
//! lock, which lets the retry policy free the third slot while the last digit
//! is being dialed.
//!
//! At most one run is in flight per lock; a second run is rejected with
//! [`Error::CommandInFlight`]. A run is never cancelled, even if the lock is
//! solved or disarmed meanwhile.

use crate::command::Command;
use crate::timing::PressTiming;
use dialock_core::{DialPosition, Error, Result, TurnDirection};
use dialock_lock::CombinationLock;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, trace};

/// Outcome of [`CommandInterpreter::execute`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum Execution {
    /// Input was not a command; the lock was not touched.
    Ignored,

    /// The command ran to completion.
    Completed {
        /// Left and right presses made, resets excluded.
        presses: u32,

        /// Digits entered when the run finished.
        entered: Vec<DialPosition>,
    },
}

/// Drives a shared lock from scripted commands.
#[derive(Clone)]
pub struct CommandInterpreter {
    lock: Arc<Mutex<CombinationLock>>,
    timing: PressTiming,
}

impl CommandInterpreter {
    pub fn new(lock: Arc<Mutex<CombinationLock>>, timing: PressTiming) -> Self {
        Self { lock, timing }
    }

    /// The lock this interpreter drives.
    pub fn lock(&self) -> &Arc<Mutex<CombinationLock>> {
        &self.lock
    }

    pub fn timing(&self) -> PressTiming {
        self.timing
    }

    /// Parse and run one command line.
    ///
    /// Malformed input yields [`Execution::Ignored`].
    ///
    /// # Errors
    /// Returns `Error::CommandInFlight` if another run on the same lock has
    /// not finished yet.
    pub async fn execute(&self, input: &str) -> Result<Execution> {
        let Some(command) = Command::parse(input) else {
            return Ok(Execution::Ignored);
        };
        self.run(command).await
    }

    /// Run an already parsed command.
    ///
    /// # Errors
    /// Returns `Error::CommandInFlight` if another run on the same lock has
    /// not finished yet.
    pub async fn run(&self, command: Command) -> Result<Execution> {
        let (gate, name) = {
            let lock = self.lock.lock().await;
            (lock.command_gate(), lock.name().to_string())
        };

        let _running = gate
            .try_lock_owned()
            .map_err(|_| Error::CommandInFlight { lock: name.clone() })?;

        info!(module = %name, %command, "Running scripted command");

        let needs_reset = !self.lock.lock().await.entered().is_empty();
        if needs_reset {
            self.lock.lock().await.press_reset();
            self.pause(self.timing.reset_settle).await;
        }

        let mut presses = 0u32;
        let mut direction = TurnDirection::Right;

        for &target in command.digits() {
            presses += self.dial_to(target, direction).await;
            self.pause(self.timing.digit_settle).await;
            direction = direction.opposite();
        }

        let entered = self.lock.lock().await.entered().to_vec();
        debug!(module = %name, presses, ?entered, "Scripted command finished");

        Ok(Execution::Completed { presses, entered })
    }

    /// Press in `direction` at least once, then until the dial shows `target`.
    async fn dial_to(&self, target: DialPosition, direction: TurnDirection) -> u32 {
        let mut presses = 0;

        loop {
            let position = {
                let mut lock = self.lock.lock().await;
                lock.update();
                lock.press(direction);
                lock.position()
            };
            presses += 1;
            trace!(%direction, %position, %target, "Scripted press");

            self.pause(self.timing.press).await;

            if position == target {
                return presses;
            }
        }
    }

    async fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
