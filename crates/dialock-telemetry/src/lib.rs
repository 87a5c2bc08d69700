//! Telemetry consumption for the combination lock puzzle.
//!
//! The lock's passcode is derived from facts owned by the surrounding puzzle
//! host: rotating auth codes, how many other puzzles are solved, the serial
//! number, battery and module counts. This crate defines how those facts are
//! read and watched. It never produces them.
//!
//! # Telemetry Sources
//!
//! The [`TelemetrySource`] trait is the read-only seam to the host:
//!
//! ```
//! use dialock_core::{PasscodeDeriver, TelemetrySnapshot};
//! use dialock_telemetry::{MockTelemetry, TelemetrySource};
//!
//! let snapshot = TelemetrySnapshot::new(vec![5, 1, 9]).unwrap().with_total_modules(11);
//! let (source, _handle) = MockTelemetry::new(snapshot);
//!
//! let code = PasscodeDeriver::derive(&source.snapshot());
//! assert_eq!(code.to_string(), "9 11 0");
//! ```
//!
//! # Change Monitoring
//!
//! The [`TelemetryMonitor`] polls a source while the puzzle is active and
//! reports a freshly derived code whenever the solved count or the rotating
//! codes move. It only observes: the live solved check always derives its own
//! code.
//!
//! ```no_run
//! use std::sync::Arc;
//! use dialock_core::TelemetrySnapshot;
//! use dialock_telemetry::{
//!     ActiveFlag, MockTelemetry, MonitorConfig, TelemetryMonitor, TracingLog,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let snapshot = TelemetrySnapshot::new(vec![4]).unwrap();
//!     let (source, handle) = MockTelemetry::new(snapshot);
//!     let active = ActiveFlag::new(true);
//!
//!     let mut monitor = TelemetryMonitor::new(
//!         Arc::new(source),
//!         Arc::new(TracingLog::new("Combination Lock #1")),
//!         active.clone(),
//!         MonitorConfig::default(),
//!     )
//!     .start();
//!
//!     handle.mark_solved();
//!     if let Some(event) = monitor.recv().await {
//!         println!("{event:?}");
//!     }
//!
//!     active.set(false);
//!     monitor.join().await;
//! }
//! ```

pub mod mock;
pub mod monitor;
pub mod traits;

// Re-export commonly used types for convenience
pub use mock::{MockTelemetry, MockTelemetryHandle};
pub use monitor::{
    ActiveFlag, MonitorConfig, MonitorEvent, MonitorHandle, TelemetryChange, TelemetryMonitor,
};
pub use traits::{LogSink, TelemetrySource, TracingLog};
