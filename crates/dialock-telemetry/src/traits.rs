//! Telemetry and logging collaborator traits.
//!
//! These traits establish the contract between the lock and the puzzle host:
//! [`TelemetrySource`] is read-only and polled, [`LogSink`] receives the
//! module's diagnostic text.
//!
//! Both traits are synchronous and object-safe, so hosts can hand them over as
//! `Arc<dyn TelemetrySource>` / `Arc<dyn LogSink>`.

use dialock_core::TelemetrySnapshot;
use tracing::info;

/// Read-only source of puzzle telemetry.
///
/// Implementations return an immutable [`TelemetrySnapshot`] of the current
/// facts. The lock never writes back, and values are trusted as given.
///
/// The per-field accessors are provided on top of [`snapshot`]; override them
/// only if a source can answer a single field more cheaply.
///
/// # Examples
///
/// ```
/// use dialock_core::TelemetrySnapshot;
/// use dialock_telemetry::TelemetrySource;
///
/// struct FixedBomb;
///
/// impl TelemetrySource for FixedBomb {
///     fn snapshot(&self) -> TelemetrySnapshot {
///         TelemetrySnapshot::new(vec![3, 8])
///             .expect("serial is non-empty")
///             .with_battery_count(2)
///     }
/// }
///
/// assert_eq!(FixedBomb.battery_count(), 2);
/// assert_eq!(FixedBomb.serial_digits(), vec![3, 8]);
/// ```
///
/// [`snapshot`]: TelemetrySource::snapshot
pub trait TelemetrySource: Send + Sync {
    /// Read the current telemetry.
    fn snapshot(&self) -> TelemetrySnapshot;

    /// Rotating auth codes; empty when the host shows none.
    fn rotating_codes(&self) -> Vec<u32> {
        self.snapshot().rotating_codes().to_vec()
    }

    /// Number of puzzles solved elsewhere.
    fn solved_count(&self) -> u32 {
        self.snapshot().solved_count()
    }

    /// Numeric digits of the serial identifier. Never empty.
    fn serial_digits(&self) -> Vec<u8> {
        self.snapshot().serial_digits().to_vec()
    }

    fn battery_count(&self) -> u32 {
        self.snapshot().battery_count()
    }

    fn total_modules(&self) -> u32 {
        self.snapshot().total_modules()
    }
}

/// Diagnostic text sink owned by the puzzle host.
pub trait LogSink: Send + Sync {
    /// Record one line of module diagnostics.
    fn log(&self, message: &str);
}

/// [`LogSink`] that forwards every line to `tracing` at info level.
///
/// Each event carries the module's log-friendly name in the `module` field.
#[derive(Debug, Clone)]
pub struct TracingLog {
    name: String,
}

impl TracingLog {
    /// Create a sink that tags its lines with `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Get the module name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl LogSink for TracingLog {
    fn log(&self, message: &str) {
        info!(module = %self.name, "{}", message);
    }
}
