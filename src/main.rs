use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use log::{error, info};

mod bnb;
mod constructive;
mod error;
mod files;
mod heuristic;
mod incumbent;
mod instance;
mod orchestrator;
mod render;
mod schedule;
mod search_state;

use error::JsspError;
use incumbent::Incumbent;
use orchestrator::Mode;

const DEFAULT_BLOCK_SIZE: u32 = 5;
const MAX_REPEATS: u32 = 100;
const BRANCH_LOG_PATH: &str = "branches.txt";
const INTERRUPT_SNAPSHOT_PATH: &str = "interrupted_output.txt";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliMode {
    ExactBnb,
    ExactExhaustive,
    Heuristic,
}

impl From<CliMode> for Mode {
    fn from(mode: CliMode) -> Self {
        match mode {
            CliMode::ExactBnb => Mode::ExactBnb,
            CliMode::ExactExhaustive => Mode::ExactExhaustive,
            CliMode::Heuristic => Mode::Heuristic,
        }
    }
}

/// Solves a job-shop scheduling instance to optimality (small instances) or
/// heuristically (larger ones), writing a result file with the best
/// makespan, start times, and a textual Gantt chart.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Instance file to solve.
    input: PathBuf,
    /// Result file to write.
    output: PathBuf,
    /// `[threads] repeats`: one value means `repeats` with a single thread;
    /// two values mean `threads repeats`.
    #[arg(num_args = 1..=2)]
    tail: Vec<u32>,
    /// Search mode.
    #[arg(long, value_enum, default_value_t = CliMode::ExactBnb)]
    mode: CliMode,
    /// Time units represented by one character of the Gantt chart.
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: u32,
}

struct Args {
    input: PathBuf,
    output: PathBuf,
    threads: usize,
    repeats: u32,
    mode: Mode,
    block_size: u32,
}

fn parse_args() -> Result<Args, JsspError> {
    let cli = Cli::parse();
    let (threads, repeats) = match cli.tail.as_slice() {
        [repeats] => (1usize, *repeats),
        [threads, repeats] => (*threads as usize, *repeats),
        _ => return Err(JsspError::Argument("expected `[threads] repeats`".to_string())),
    };
    if !(1..=MAX_REPEATS).contains(&repeats) {
        return Err(JsspError::Argument(format!(
            "repeats must be in 1..={MAX_REPEATS}, got {repeats}"
        )));
    }
    if threads < 1 {
        return Err(JsspError::Argument("threads must be at least 1".to_string()));
    }

    Ok(Args {
        input: cli.input,
        output: cli.output,
        threads,
        repeats,
        mode: cli.mode.into(),
        block_size: cli.block_size,
    })
}

enum Outcome {
    Completed,
    Interrupted,
}

fn run() -> Result<Outcome, JsspError> {
    let args = parse_args()?;

    info!("loading instance from {}", args.input.display());
    let instance = files::read_instance(&args.input)?;

    let incumbent = Arc::new(Incumbent::new());
    let handler_incumbent = Arc::clone(&incumbent);
    ctrlc::set_handler(move || {
        handler_incumbent.interrupt();
    })
    .expect("failed to install SIGINT handler");

    let instance_name = args.input.display().to_string();
    let outcome = orchestrator::run(
        &instance,
        &incumbent,
        args.mode,
        args.threads,
        args.repeats,
        &PathBuf::from(BRANCH_LOG_PATH),
    )?;

    if outcome.interrupted {
        error!("interrupted with best makespan {}", outcome.makespan);
        files::write_interrupt_snapshot(
            &PathBuf::from(INTERRUPT_SNAPSHOT_PATH),
            outcome.makespan,
            outcome.avg_time_secs,
            &outcome.schedule,
        )?;
        return Ok(Outcome::Interrupted);
    }

    files::write_result(
        &args.output,
        &instance_name,
        instance.num_machines,
        outcome.makespan,
        &outcome.schedule,
        args.block_size,
        outcome.avg_time_secs,
        args.repeats,
    )?;

    info!("wrote result to {} (makespan {})", args.output.display(), outcome.makespan);
    Ok(Outcome::Completed)
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(Outcome::Completed) => ExitCode::SUCCESS,
        Ok(Outcome::Interrupted) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
