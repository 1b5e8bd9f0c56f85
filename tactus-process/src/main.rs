//! Tactus host process
//!
//! Wires the device bank and the step controller together and drives the
//! compiled sequence from a fixed-interval polling loop. All controller
//! calls happen on this one thread; the core assumes single-writer
//! access.

mod loader;

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use tactus_core::sequence::Instruction;
use tactus_core::step::{StepController, StepError};
use tactus_drivers::DeviceBank;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(
    name = "tactus-process",
    about = "Drive the process cell through a compiled step sequence"
)]
struct Args {
    /// Process-definition file
    #[arg(long, default_value = "process_sequence.txt")]
    sequence_file: PathBuf,

    /// Externally supplied initial command ("init" starts the compiled
    /// sequence directly)
    #[arg(long, default_value = "init")]
    command: String,

    /// Poll interval of the driving loop in milliseconds
    #[arg(long, default_value_t = 500)]
    interval_ms: u64,

    /// Ignore device readiness and pace the sequence by the poll
    /// interval alone (dry run without the cell's status links)
    #[arg(long)]
    open_loop: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let command = match Instruction::try_from(args.command.as_str()) {
        Ok(command) => command,
        Err(_) => {
            error!(command = %args.command, "initial command too long");
            return ExitCode::FAILURE;
        }
    };

    let sequence = loader::load_sequence(&args.sequence_file);
    info!(steps = sequence.len(), "sequence sealed");

    let bank = DeviceBank::default_station();
    let mut controller = StepController::new(command, sequence, bank);

    if args.open_loop {
        warn!("open-loop pacing: device readiness is not consulted");
    }

    loop {
        if controller.is_sequence_completed() {
            info!("sequence completed");
            return ExitCode::SUCCESS;
        }

        if args.open_loop || controller.is_ready_to_advance() {
            match controller.advance() {
                Ok(status) => {
                    info!(
                        step = controller.current_step(),
                        status = status.as_str(),
                        "step dispatched"
                    );
                }
                Err(StepError::SequenceExhausted { index }) => {
                    error!(index, "advanced past the end of the sequence");
                    return ExitCode::FAILURE;
                }
            }
        } else {
            debug!(step = controller.current_step(), "cell not in standby, waiting");
        }

        thread::sleep(Duration::from_millis(args.interval_ms));
    }
}
