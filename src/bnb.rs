//! The recursive branch-and-bound explorer, its unpruned full-search twin,
//! and the root-level fan-out that distributes the first branching decision
//! across worker threads.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::thread;

use crate::incumbent::Incumbent;
use crate::instance::Instance;
use crate::search_state::SearchState;

/// Whether pruning is active. `Exhaustive` disables the bound check and
/// emits every branch to the audit log; used for validation, not production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Bnb,
    Exhaustive,
}

/// Sink for the branch-audit log written in exhaustive mode: one line per
/// generated branch, serialized through a single mutex.
pub struct BranchAudit {
    writer: Mutex<Box<dyn std::io::Write + Send>>,
    serial: AtomicU64,
}

impl BranchAudit {
    pub fn new(writer: Box<dyn std::io::Write + Send>) -> Self {
        BranchAudit {
            writer: Mutex::new(writer),
            serial: AtomicU64::new(0),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn log(&self, depth: usize, job: usize, op: usize, machine: usize, start: u32, end: u32, makespan: u32) {
        let n = self.serial.fetch_add(1, Ordering::SeqCst) + 1;
        let mut w = self.writer.lock().unwrap();
        let _ = writeln!(w, "{n} {depth} {job} {op} {machine} {start} {end} {makespan}");
    }
}

/// Everything one recursive call needs that doesn't change along the path:
/// the instance, the shared incumbent, the mode, and the optional audit
/// sink. Borrowed, not owned, so workers can share it without an `Arc`.
struct SearchContext<'a> {
    instance: &'a Instance,
    incumbent: &'a Incumbent,
    mode: Mode,
    audit: Option<&'a BranchAudit>,
}

fn recurse(ctx: &SearchContext, state: &SearchState) {
    if ctx.incumbent.is_interrupted() {
        return;
    }

    if state.is_complete(ctx.instance) {
        if state.current_makespan < ctx.incumbent.best_makespan() {
            ctx.incumbent.try_improve(state.current_makespan, &state.to_schedule());
        }
        return;
    }

    for job in 0..ctx.instance.num_jobs {
        if ctx.incumbent.is_interrupted() {
            return;
        }
        let Some((op_index, start, end)) = state.candidate_placement(ctx.instance, job) else {
            continue;
        };

        if ctx.mode == Mode::Bnb && end >= ctx.incumbent.best_makespan() {
            continue; // pruned: this branch cannot improve on the incumbent
        }

        let op = ctx.instance.op(job, op_index);
        let running_makespan = end.max(state.current_makespan);
        if let Some(audit) = ctx.audit {
            audit.log(state.scheduled_ops + 1, job, op_index, op.machine, start, end, running_makespan);
        }

        let child = state.extend(job, op_index, op.machine, op.duration, start, end);
        recurse(ctx, &child);
    }
}

/// Runs the branch-and-bound (or exhaustive) search to completion or
/// interruption, fanning the root-level seed choice out across `threads`
/// worker threads that dynamically draw the next unclaimed seed. On return,
/// the optimal makespan and a witnessing schedule are in `incumbent`
/// (unless interrupted before any leaf was reached).
pub fn run(instance: &Instance, incumbent: &Incumbent, threads: usize, mode: Mode, audit: Option<&BranchAudit>) {
    let next_seed = std::sync::atomic::AtomicUsize::new(0);
    let worker_count = threads.max(1).min(instance.num_jobs.max(1));

    thread::scope(|scope| {
        for _ in 0..worker_count {
            scope.spawn(|| {
                let ctx = SearchContext { instance, incumbent, mode, audit };
                loop {
                    if incumbent.is_interrupted() {
                        return;
                    }
                    let seed = next_seed.fetch_add(1, Ordering::SeqCst);
                    if seed >= instance.num_jobs {
                        return;
                    }
                    let state = SearchState::seed(instance, seed);
                    recurse(&ctx, &state);
                }
            });
        }
    });
}
