pub mod constants;
pub mod error;
pub mod passcode;
pub mod types;

pub use error::{Error, Result};
pub use passcode::PasscodeDeriver;
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
