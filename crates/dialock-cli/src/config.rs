//! Application configuration.

use std::time::Duration;

use dialock_command::PressTiming;
use dialock_core::{Error, Result, TelemetrySnapshot};
use dialock_lock::LockConfig;
use dialock_telemetry::MonitorConfig;

use crate::cli::Cli;

/// Complete application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Telemetry served by the mock host at start.
    pub telemetry: TelemetrySnapshot,

    /// Lock name and monitor settings.
    pub lock: LockConfig,

    /// Pacing of scripted submissions.
    pub timing: PressTiming,

    /// Solved check rate.
    pub tick_interval: Duration,

    /// Print JSON lines instead of text.
    pub json: bool,
}

impl AppConfig {
    /// Build the configuration from CLI arguments.
    ///
    /// # Errors
    /// Returns `Error::EmptySerial` if the serial has no digits, or
    /// `Error::Config` for a zero tick interval.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let telemetry = TelemetrySnapshot::new(cli.serial_digits())?
            .with_rotating_codes(cli.codes.clone().unwrap_or_default())
            .with_battery_count(cli.batteries)
            .with_total_modules(cli.modules)
            .with_solved_count(cli.solved);

        if cli.tick_ms == 0 || cli.poll_ms == 0 {
            return Err(Error::Config(
                "tick and poll intervals must be positive".to_string(),
            ));
        }

        let monitor =
            MonitorConfig::default().with_poll_interval(Duration::from_millis(cli.poll_ms));
        let lock = match &cli.name {
            Some(name) => LockConfig::default().with_name(name.clone()),
            None => LockConfig::numbered(),
        }
        .with_monitor(monitor);

        Ok(Self {
            telemetry,
            lock,
            timing: PressTiming::default(),
            tick_interval: Duration::from_millis(cli.tick_ms),
            json: cli.json,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli_defaults() {
        let cli = Cli::parse_from(["dialock"]);
        let config = AppConfig::from_cli(&cli).unwrap();

        assert_eq!(config.telemetry.serial_digits(), &[5, 9]);
        assert_eq!(config.telemetry.total_modules(), 11);
        assert!(config.telemetry.rotating_codes().is_empty());
        assert!(config.lock.name.starts_with("Combination Lock #"));
        assert_eq!(config.lock.monitor.poll_interval, Duration::from_millis(100));
        assert_eq!(config.tick_interval, Duration::from_millis(50));
        assert_eq!(config.timing, PressTiming::default());
    }

    #[test]
    fn test_from_cli_overrides() {
        let cli = Cli::parse_from([
            "dialock",
            "--codes",
            "42,17",
            "--batteries",
            "3",
            "--solved",
            "1",
            "--name",
            "Vault",
            "--json",
        ]);
        let config = AppConfig::from_cli(&cli).unwrap();

        assert_eq!(config.telemetry.rotating_codes(), &[42, 17]);
        assert_eq!(config.telemetry.battery_count(), 3);
        assert_eq!(config.telemetry.solved_count(), 1);
        assert_eq!(config.lock.name, "Vault");
        assert!(config.json);
    }

    #[test]
    fn test_serial_without_digits_rejected() {
        let cli = Cli::parse_from(["dialock", "--serial", "ABCDEF"]);
        assert!(matches!(AppConfig::from_cli(&cli), Err(Error::EmptySerial)));
    }

    #[test]
    fn test_zero_tick_rejected() {
        let cli = Cli::parse_from(["dialock", "--tick-ms", "0"]);
        assert!(matches!(AppConfig::from_cli(&cli), Err(Error::Config(_))));
    }
}
