//! Mode selection, repeat-averaging, and incumbent-to-file handoff. This is
//! the thin layer `main` calls into once CLI parsing has produced a valid
//! configuration.

use std::path::Path;
use std::time::Instant;

use log::{debug, info, warn};

use crate::bnb::{self, BranchAudit, Mode as BnbMode};
use crate::error::JsspError;
use crate::files;
use crate::heuristic;
use crate::incumbent::Incumbent;
use crate::instance::Instance;
use crate::schedule::Schedule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    ExactBnb,
    ExactExhaustive,
    Heuristic,
}

pub struct RunOutcome {
    pub makespan: u32,
    pub schedule: Schedule,
    pub avg_time_secs: f64,
    pub interrupted: bool,
}

/// Runs `mode` over `instance` `repeats` times, resetting the incumbent
/// before each repeat, and returns the last repeat's result together with
/// the average wall-clock time across all repeats. If an interrupt is
/// observed mid-repeat, stops immediately and reports whatever incumbent
/// exists.
pub fn run(
    instance: &Instance,
    incumbent: &Incumbent,
    mode: Mode,
    threads: usize,
    repeats: u32,
    branch_log_path: &Path,
) -> Result<RunOutcome, JsspError> {
    let mut total_secs = 0.0;
    let mut completed_repeats = 0u32;
    let mut interrupted = false;

    for repeat in 0..repeats {
        incumbent.reset();
        info!("starting repeat {}/{repeats} in mode {mode:?}", repeat + 1);
        let started = Instant::now();

        match mode {
            Mode::ExactBnb => {
                bnb::run(instance, incumbent, threads, BnbMode::Bnb, None);
            }
            Mode::ExactExhaustive => {
                let file = files::open_branch_log(branch_log_path)?;
                let audit = BranchAudit::new(Box::new(file));
                bnb::run(instance, incumbent, 1, BnbMode::Exhaustive, Some(&audit));
            }
            Mode::Heuristic => {
                let schedule = heuristic::improve(instance);
                let makespan = schedule.makespan();
                incumbent.try_improve(makespan, &schedule);
            }
        }

        let elapsed = started.elapsed().as_secs_f64();
        total_secs += elapsed;
        completed_repeats += 1;

        if incumbent.is_interrupted() {
            warn!("interrupted during repeat {}/{repeats}", repeat + 1);
            interrupted = true;
            break;
        }

        if let Some((makespan, _)) = incumbent.snapshot() {
            debug!("repeat {} finished: makespan={makespan} elapsed={elapsed:.3}s", repeat + 1);
        }
    }

    let avg_time_secs = if completed_repeats > 0 {
        total_secs / f64::from(completed_repeats)
    } else {
        0.0
    };

    let (makespan, schedule) = incumbent
        .snapshot()
        .ok_or_else(|| JsspError::Argument("search produced no feasible schedule".to_string()))?;

    Ok(RunOutcome { makespan, schedule, avg_time_secs, interrupted })
}
