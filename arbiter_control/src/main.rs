//! # Arbiter Control
//!
//! Runs the Idle / Follow / Teleop mode controller as a standalone process.
//!
//! Events are read as newline-delimited JSON from stdin and outputs are
//! written as newline-delimited JSON to stdout:
//!
//! ```bash
//! printf '%s\n' '{"target_status":true}' '{"input_frame":[false,true,false,false]}' \
//!     | arbiter_control --config config/arbiter.toml
//! # {"mode":"FOLLOW","indicator_code":1,"idle":false}
//! ```
//!
//! The stdin reader and the controller run on separate threads joined by
//! the ordered event queue. Ctrl-C or EOF on stdin ends the run.

use arbiter_common::config::{ArbiterConfig, LogLevel};
use arbiter_common::consts::DEFAULT_CONFIG_PATH;
use arbiter_control::mode::controller::ModeController;
use arbiter_control::output::JsonLinesSink;
use arbiter_control::runner::{ControllerEvent, ControllerRunner, EventSender, event_queue};
use clap::Parser;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Arbiter Control — robot operating-mode arbitration
#[derive(Parser, Debug)]
#[command(name = "arbiter_control")]
#[command(version)]
#[command(about = "Idle / follow / teleop mode arbitration for a mobile robot")]
struct Args {
    /// Path to the arbiter configuration TOML.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Enable verbose logging (DEBUG level), overriding the config log level.
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    // Logging needs the config's level, so load first and report after.
    let loaded = ArbiterConfig::load_validated(&args.config);
    let log_level = loaded
        .as_ref()
        .map(|c| c.shared.log_level)
        .unwrap_or_default();
    setup_tracing(&args, log_level);

    info!("Arbiter Control v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("FATAL: config {}: {e}", args.config.display());
            process::exit(1);
        }
    };

    if let Err(e) = run(config) {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("Arbiter Control shutdown complete");
}

fn run(config: ArbiterConfig) -> Result<(), Box<dyn std::error::Error>> {
    let controller = ModeController::with_monotonic_clock(&config.controller)?;
    info!(
        service = %config.shared.service_name,
        idle_button = config.controller.idle_button,
        follow_button = config.controller.follow_button,
        teleop_button = config.controller.teleop_button,
        timeout_s = config.controller.target_loss_timeout,
        "Controller ready in {}",
        controller.mode()
    );

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    })?;

    let (sender, receiver) = event_queue();
    // Detached: a reader blocked on stdin must not hold up shutdown.
    let _reader = thread::Builder::new()
        .name("stdin-events".into())
        .spawn(move || read_events(io::stdin().lock(), sender))?;

    let mut runner = ControllerRunner::new(controller, JsonLinesSink::new(io::stdout()));
    runner.run(&receiver, &running)?;

    let stats = runner.stats();
    info!(
        frames = stats.frames_processed,
        dropped = stats.frames_dropped,
        target_updates = stats.target_updates,
        mode_changes = stats.mode_changes,
        "Final mode {}",
        runner.controller().mode()
    );
    Ok(())
}

/// Forward newline-delimited JSON events until EOF or the queue closes.
fn read_events(input: impl BufRead, sender: EventSender) {
    for (line_no, line) in input.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("stdin read error: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<ControllerEvent>(&line) {
            Ok(event) => {
                if sender.send(event).is_err() {
                    break;
                }
            }
            Err(e) => warn!(line = line_no + 1, "skipping unparseable event: {e}"),
        }
    }
    debug!("stdin closed");
}

/// Setup tracing subscriber based on CLI arguments and the config level.
fn setup_tracing(args: &Args, log_level: LogLevel) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::from(log_level)
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());
    // stdout carries controller outputs; logs go to stderr.
    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .compact()
            .init();
    }
}
