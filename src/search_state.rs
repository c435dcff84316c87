use crate::instance::Instance;
use crate::schedule::{ScheduledOp, Schedule};

/// Per-branch dynamic state carried along one path of the recursion. Each
/// recursive call owns its own copy: extending a state allocates a new one
/// rather than mutating the parent in place, so a caller can keep iterating
/// sibling branches unaffected by what a child did.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub scheduled_ops: usize,
    pub job_progress: Vec<usize>,
    pub job_ready: Vec<u32>,
    pub machine_ready: Vec<u32>,
    pub current_schedule: Vec<Vec<ScheduledOp>>,
    pub current_makespan: u32,
}

impl SearchState {
    /// The empty state at the root of the search tree.
    pub fn root(instance: &Instance) -> Self {
        SearchState {
            scheduled_ops: 0,
            job_progress: vec![0; instance.num_jobs],
            job_ready: vec![0; instance.num_jobs],
            machine_ready: vec![0; instance.num_machines],
            current_schedule: vec![Vec::with_capacity(instance.ops_per_job()); instance.num_jobs],
            current_makespan: 0,
        }
    }

    pub fn is_complete(&self, instance: &Instance) -> bool {
        self.scheduled_ops == instance.total_ops()
    }

    /// The start/end a placement of `job`'s next operation would get if
    /// branched on right now, without mutating this state.
    pub fn candidate_placement(&self, instance: &Instance, job: usize) -> Option<(usize, u32, u32)> {
        let next_op = self.job_progress[job];
        if next_op >= instance.ops_per_job() {
            return None;
        }
        let op = instance.op(job, next_op);
        let start = self.machine_ready[op.machine].max(self.job_ready[job]);
        let end = start + op.duration;
        Some((next_op, start, end))
    }

    /// Produces the child state resulting from placing `job`'s next
    /// operation, given the `(op_index, start, end)` already computed by
    /// `candidate_placement`.
    #[allow(clippy::too_many_arguments)]
    pub fn extend(&self, job: usize, op_index: usize, op_machine: usize, op_duration: u32, start: u32, end: u32) -> SearchState {
        let mut child = self.clone();
        child.current_schedule[job].push(ScheduledOp {
            machine: op_machine,
            duration: op_duration,
            start,
            end,
        });
        child.machine_ready[op_machine] = end;
        child.job_ready[job] = end;
        child.job_progress[job] = op_index + 1;
        child.scheduled_ops += 1;
        child.current_makespan = child.current_makespan.max(end);
        child
    }

    /// Builds a seed state with `job`'s first operation placed at time 0,
    /// the root-level fan-out used to distribute work across threads.
    pub fn seed(instance: &Instance, job: usize) -> SearchState {
        let root = SearchState::root(instance);
        let op = instance.op(job, 0);
        root.extend(job, 0, op.machine, op.duration, 0, op.duration)
    }

    pub fn to_schedule(&self) -> Schedule {
        Schedule {
            ops: self.current_schedule.clone(),
        }
    }
}
