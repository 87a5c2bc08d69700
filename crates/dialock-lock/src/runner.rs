//! Puzzle-runner collaborator.
//!
//! The host puzzle-runner receives the module's log lines and is told once
//! when the lock opens. [`TracingRunner`] forwards both to `tracing`;
//! [`RecordingRunner`] keeps them in memory for tests and embedding hosts.

use dialock_telemetry::{LogSink, TracingLog};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::info;

/// Host-side owner of a puzzle module.
///
/// Extends [`LogSink`], so a runner can be handed to the telemetry monitor
/// as its log sink.
pub trait PuzzleRunner: LogSink {
    /// Report that the module has been solved.
    ///
    /// Called at most once per armed puzzle.
    fn report_solved(&self);
}

/// Runner that forwards to `tracing`.
#[derive(Debug, Clone)]
pub struct TracingRunner {
    log: TracingLog,
}

impl TracingRunner {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            log: TracingLog::new(name),
        }
    }

    pub fn name(&self) -> &str {
        self.log.name()
    }
}

impl LogSink for TracingRunner {
    fn log(&self, message: &str) {
        self.log.log(message);
    }
}

impl PuzzleRunner for TracingRunner {
    fn report_solved(&self) {
        info!(module = %self.log.name(), "Solve reported to puzzle runner");
    }
}

/// Runner that records every log line and solve report.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    lines: Mutex<Vec<String>>,
    solves: AtomicU32,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every line logged so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Check whether `line` has been logged.
    pub fn contains(&self, line: &str) -> bool {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|l| l == line)
    }

    /// Number of solve reports received.
    pub fn solve_count(&self) -> u32 {
        self.solves.load(Ordering::Acquire)
    }
}

impl LogSink for RecordingRunner {
    fn log(&self, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

impl PuzzleRunner for RecordingRunner {
    fn report_solved(&self) {
        self.solves.fetch_add(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_recording_runner() {
        let runner = RecordingRunner::new();
        runner.log("Pressed reset");
        runner.report_solved();

        assert_eq!(runner.lines(), vec!["Pressed reset".to_string()]);
        assert!(runner.contains("Pressed reset"));
        assert!(!runner.contains("Module solved"));
        assert_eq!(runner.solve_count(), 1);
    }

    #[test]
    fn test_runner_usable_as_log_sink() {
        let runner = Arc::new(RecordingRunner::new());
        let sink: Arc<dyn LogSink> = runner.clone();

        sink.log("New solution: 1 2 3");
        assert!(runner.contains("New solution: 1 2 3"));
    }

    #[test]
    fn test_tracing_runner() {
        let runner = TracingRunner::new("Combination Lock #2");
        assert_eq!(runner.name(), "Combination Lock #2");

        runner.log("Turned left to: 4");
        runner.report_solved();
    }
}
