use crate::instance::Instance;
use crate::schedule::{ScheduledOp, Schedule};

/// Greedy list scheduler: for each job in order, for each operation in
/// order, start it as soon as both its machine and its job are free. Yields
/// a semi-active schedule consistent with the instance's declared
/// job/operation order. Cannot fail on well-formed input.
pub fn schedule(instance: &Instance) -> Schedule {
    let mut job_ready = vec![0u32; instance.num_jobs];
    let mut machine_ready = vec![0u32; instance.num_machines];
    let mut ops = Vec::with_capacity(instance.num_jobs);

    for (job, row) in instance.jobs.iter().enumerate() {
        let mut scheduled_row = Vec::with_capacity(row.operations.len());
        for op in &row.operations {
            let start = machine_ready[op.machine].max(job_ready[job]);
            let end = start + op.duration;
            scheduled_row.push(ScheduledOp {
                machine: op.machine,
                duration: op.duration,
                start,
                end,
            });
            machine_ready[op.machine] = end;
            job_ready[job] = end;
        }
        ops.push(scheduled_row);
    }

    Schedule { ops }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{Job, Operation};

    #[test]
    fn greedy_schedule_is_feasible_and_matches_baseline() {
        let instance = Instance {
            num_jobs: 2,
            num_machines: 2,
            jobs: vec![
                Job {
                    operations: vec![
                        Operation { machine: 0, duration: 3 },
                        Operation { machine: 1, duration: 2 },
                    ],
                },
                Job {
                    operations: vec![
                        Operation { machine: 0, duration: 2 },
                        Operation { machine: 1, duration: 4 },
                    ],
                },
            ],
        };
        let result = schedule(&instance);
        assert!(result.is_feasible(&instance));
        // Job 0 runs first in declared order: starts 0 and 3.
        // Job 1 waits for machine 0 until job 0 frees it at t=3.
        assert_eq!(result.ops[0][0].start, 0);
        assert_eq!(result.ops[1][0].start, 3);
        assert_eq!(result.makespan(), 9);
    }

    #[test]
    fn single_job_is_purely_sequential() {
        let instance = Instance {
            num_jobs: 1,
            num_machines: 3,
            jobs: vec![Job {
                operations: vec![
                    Operation { machine: 0, duration: 5 },
                    Operation { machine: 1, duration: 5 },
                    Operation { machine: 2, duration: 5 },
                ],
            }],
        };
        let result = schedule(&instance);
        assert_eq!(result.start_times(), vec![vec![0, 5, 10]]);
        assert_eq!(result.makespan(), 15);
    }
}
