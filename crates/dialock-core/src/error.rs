use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Dial errors
    #[error("Invalid dial position: {value} (dial has {size} positions)")]
    InvalidPosition { value: u32, size: u8 },

    #[error("Invalid passcode length: expected {expected}, got {actual}")]
    InvalidCodeLength { expected: usize, actual: usize },

    // Telemetry errors
    #[error("Serial number must contain at least one digit")]
    EmptySerial,

    #[error("Invalid serial digit: {0}")]
    InvalidSerialDigit(u8),

    // Command errors
    #[error("A scripted command is already running on {lock}")]
    CommandInFlight { lock: String },

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
