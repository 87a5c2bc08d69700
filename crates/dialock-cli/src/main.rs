//! Dialock console binary.
//!
//! Runs one combination lock against a mock puzzle host. The lock is armed at
//! start, ticked at a fixed rate and driven from stdin.

mod cli;
mod config;
mod console;

use std::sync::Arc;

use anyhow::Context;
use dialock_command::{CommandInterpreter, Execution};
use dialock_lock::{CombinationLock, LockStatus, TracingRunner};
use dialock_telemetry::{MockTelemetry, MockTelemetryHandle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::console::{ConsoleCommand, HELP};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Set up logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    info!("Dialock v{}", dialock_core::VERSION);

    let config = AppConfig::from_cli(&cli).context("Invalid configuration")?;
    run(config).await
}

/// Shared state for console command handling.
struct Session {
    lock: Arc<Mutex<CombinationLock>>,
    interpreter: CommandInterpreter,
    telemetry: MockTelemetryHandle,
    json: bool,
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let (source, telemetry) = MockTelemetry::new(config.telemetry.clone());
    let runner = Arc::new(TracingRunner::new(config.lock.name.clone()));

    let mut lock = CombinationLock::new(Arc::new(source), runner, config.lock.clone());
    lock.activate();
    let monitor = lock.take_monitor();

    let lock = Arc::new(Mutex::new(lock));
    let session = Session {
        interpreter: CommandInterpreter::new(Arc::clone(&lock), config.timing),
        lock: Arc::clone(&lock),
        telemetry,
        json: config.json,
    };

    // Host tick: one solved check per interval
    let ticker = tokio::spawn({
        let lock = Arc::clone(&lock);
        let period = config.tick_interval;
        async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                if lock.lock().await.update() {
                    info!("Lock opened");
                }
            }
        }
    });

    // Monitor reports are already logged; JSON mode echoes them on stdout
    let reporter = monitor.map(|mut monitor| {
        let json = config.json;
        tokio::spawn(async move {
            while let Some(event) = monitor.recv().await {
                if json {
                    match serde_json::to_string(&event) {
                        Ok(line) => println!("{line}"),
                        Err(e) => warn!("Failed to encode monitor event: {}", e),
                    }
                }
            }
        })
    });

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read stdin")?,
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down");
                break;
            }
        };

        // EOF
        let Some(line) = line else { break };

        match ConsoleCommand::parse(&line) {
            None => {}
            Some(Err(message)) => eprintln!("{message}"),
            Some(Ok(ConsoleCommand::Quit)) => break,
            Some(Ok(command)) => session.handle(command).await?,
        }
    }

    ticker.abort();
    if let Some(reporter) = reporter {
        reporter.abort();
    }

    Ok(())
}

impl Session {
    async fn handle(&self, command: ConsoleCommand) -> anyhow::Result<()> {
        match command {
            ConsoleCommand::Left => {
                self.lock.lock().await.press_left();
                self.print_status().await?;
            }
            ConsoleCommand::Right => {
                self.lock.lock().await.press_right();
                self.print_status().await?;
            }
            ConsoleCommand::Reset => {
                self.lock.lock().await.press_reset();
                self.print_status().await?;
            }
            ConsoleCommand::Submit(line) => self.spawn_submit(line),
            ConsoleCommand::Solve => {
                let solved = self.telemetry.mark_solved();
                println!("host modules solved: {solved}");
            }
            ConsoleCommand::Codes(codes) => {
                self.telemetry.set_rotating_codes(codes);
            }
            ConsoleCommand::Status => self.print_status().await?,
            ConsoleCommand::Help => println!("{HELP}"),
            ConsoleCommand::Quit => {}
        }

        Ok(())
    }

    /// Run a submission in the background so the console stays responsive.
    fn spawn_submit(&self, line: String) {
        let interpreter = self.interpreter.clone();
        tokio::spawn(async move {
            match interpreter.execute(&line).await {
                Ok(Execution::Ignored) => eprintln!("Ignored: {line}"),
                Ok(Execution::Completed { presses, entered }) => {
                    info!(presses, ?entered, "Submission finished");
                }
                Err(e) => warn!("{}", e),
            }
        });
    }

    async fn print_status(&self) -> anyhow::Result<()> {
        let (status, solved) = {
            let lock = self.lock.lock().await;
            (lock.status(), lock.is_solved())
        };

        if self.json {
            println!("{}", serde_json::to_string(&status)?);
        } else {
            println!("{}", render(&status, solved));
        }
        Ok(())
    }
}

/// Text rendering of the dial, e.g. `dial 7 (left) entered [3 7] armed`.
fn render(status: &LockStatus, solved: bool) -> String {
    let entered: Vec<String> = status.entered.iter().map(|d| d.to_string()).collect();
    let state = match (solved, status.active) {
        (true, _) => "solved",
        (false, true) => "armed",
        (false, false) => "idle",
    };

    format!(
        "dial {} ({}) entered [{}] {}",
        status.position,
        status.direction,
        entered.join(" "),
        state
    )
}
