//! Scripted command surface for the combination lock.
//!
//! A host can drive a lock with text instructions instead of button presses.
//! The only instruction is `submit <d0> <d1> <d2>`, which dials the three
//! digits with the same presses a player would make.
//!
//! # Examples
//!
//! ```
//! use dialock_command::Command;
//!
//! let command = Command::parse("SUBMIT  5 10 15").unwrap();
//! assert_eq!(command.to_string(), "submit 5 10 15");
//!
//! // Malformed or out-of-range input is not a command
//! assert!(Command::parse("submit 5 10").is_none());
//! assert!(Command::parse("submit 5 10 25").is_none());
//! ```

pub mod command;
pub mod interpreter;
pub mod timing;

pub use command::Command;
pub use interpreter::{CommandInterpreter, Execution};
pub use timing::PressTiming;
