//! Command-line argument parsing.

use clap::Parser;

/// Interactive combination lock puzzle.
#[derive(Parser, Debug, Clone)]
#[command(name = "dialock")]
#[command(about = "Rotary combination lock puzzle driven from the console")]
#[command(version)]
pub struct Cli {
    /// Serial identifier; only its digits feed the passcode.
    #[arg(long, default_value = "AL5QF9")]
    pub serial: String,

    /// Number of batteries on the host.
    #[arg(long, default_value_t = 0)]
    pub batteries: u32,

    /// Total number of modules on the host.
    #[arg(long, default_value_t = 11)]
    pub modules: u32,

    /// Number of modules already solved.
    #[arg(long, default_value_t = 0)]
    pub solved: u32,

    /// Comma-separated rotating codes (omit for the serial fallback).
    #[arg(long, value_delimiter = ',')]
    pub codes: Option<Vec<u32>>,

    /// Log-friendly module name.
    #[arg(long)]
    pub name: Option<String>,

    /// Host tick interval in milliseconds (solved check rate).
    #[arg(long, default_value_t = 50)]
    pub tick_ms: u64,

    /// Telemetry poll interval in milliseconds.
    #[arg(long, default_value_t = 100)]
    pub poll_ms: u64,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print status and monitor reports as JSON lines.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Decimal digits of the serial, in order.
    pub fn serial_digits(&self) -> Vec<u8> {
        self.serial
            .chars()
            .filter_map(|c| c.to_digit(10))
            .filter_map(|d| u8::try_from(d).ok())
            .collect()
    }
}
