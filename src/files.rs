//! Instance-file parsing and the three text sinks the orchestrator writes
//! to: the result file, the interrupt snapshot, and (in exhaustive mode)
//! the branch-audit log.

use std::fs;
use std::path::Path;

use crate::error::JsspError;
use crate::instance::{Instance, Job, Operation};
use crate::render;
use crate::schedule::Schedule;

/// Parses a JSS instance file: `J M` on the first non-comment line, then
/// `J * M` `(machine, duration)` pairs in job-major order. Lines whose first
/// non-whitespace character is `#` are comments and are skipped entirely.
pub fn parse_instance(path: &Path, content: &str) -> Result<Instance, JsspError> {
    let tokens: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .flat_map(str::split_whitespace)
        .collect();
    let mut tokens = tokens.into_iter();

    let mut next_token = |what: &str| -> Result<&str, JsspError> {
        tokens.next().ok_or_else(|| JsspError::input(path, format!("missing {what}")))
    };

    let num_jobs: usize = next_token("job count")?
        .parse()
        .map_err(|_| JsspError::input(path, "job count is not an integer"))?;
    let num_machines: usize = next_token("machine count")?
        .parse()
        .map_err(|_| JsspError::input(path, "machine count is not an integer"))?;

    let mut jobs = Vec::with_capacity(num_jobs);
    for job in 0..num_jobs {
        let mut operations = Vec::with_capacity(num_machines);
        for op in 0..num_machines {
            let machine: usize = next_token("machine id")?
                .parse()
                .map_err(|_| JsspError::input(path, format!("bad machine id at job {job} op {op}")))?;
            let duration: u32 = next_token("duration")?
                .parse()
                .map_err(|_| JsspError::input(path, format!("bad duration at job {job} op {op}")))?;
            if machine >= num_machines {
                return Err(JsspError::input(
                    path,
                    format!("machine id {machine} out of range at job {job} op {op}"),
                ));
            }
            if duration == 0 {
                return Err(JsspError::input(path, format!("non-positive duration at job {job} op {op}")));
            }
            operations.push(Operation { machine, duration });
        }
        jobs.push(Job { operations });
    }

    Ok(Instance { num_jobs, num_machines, jobs })
}

pub fn read_instance(path: &Path) -> Result<Instance, JsspError> {
    let content = fs::read_to_string(path)
        .map_err(|e| JsspError::input(path, format!("cannot read file: {e}")))?;
    parse_instance(path, &content)
}

fn format_start_times(schedule: &Schedule) -> String {
    schedule
        .start_times()
        .iter()
        .map(|row| {
            row.iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes the final result file: header, best makespan, start-time table,
/// Gantt chart, and a performance footer averaging wall-clock time over the
/// repeated runs.
pub fn write_result(
    path: &Path,
    instance_name: &str,
    num_machines: usize,
    makespan: u32,
    schedule: &Schedule,
    block_size: u32,
    avg_time_secs: f64,
    repeats: u32,
) -> Result<(), JsspError> {
    let mut out = String::new();
    out.push_str(&format!("# Job-Shop Solution for: {instance_name}\n"));
    out.push_str(&format!("{makespan}\n"));
    out.push_str(&format_start_times(schedule));
    out.push('\n');
    out.push_str(&render::gantt_chart(schedule, num_machines, block_size));
    out.push_str("\n# Performance Analysis\n");
    out.push_str(&format!("Average runtime over {repeats} repetitions: {avg_time_secs:.6} seconds\n"));

    fs::write(path, out).map_err(|e| JsspError::output(path, e))
}

/// Writes the interrupt snapshot: header, best makespan so far, elapsed
/// time, and the start-times table for whatever partial incumbent exists.
pub fn write_interrupt_snapshot(
    path: &Path,
    makespan: u32,
    elapsed_secs: f64,
    schedule: &Schedule,
) -> Result<(), JsspError> {
    let mut out = String::new();
    out.push_str("# INTERRUPTED EXECUTION\n");
    out.push_str(&format!("Best makespan: {makespan}\n"));
    out.push_str(&format!("Elapsed time: {elapsed_secs:.2} sec\n"));
    out.push_str(&format_start_times(schedule));
    out.push('\n');

    fs::write(path, out).map_err(|e| JsspError::output(path, e))
}

/// Opens the fixed branch-audit sink used by exhaustive mode.
pub fn open_branch_log(path: &Path) -> Result<fs::File, JsspError> {
    fs::File::create(path).map_err(|e| JsspError::output(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn p() -> PathBuf {
        PathBuf::from("instance.jss")
    }

    #[test]
    fn parses_well_formed_instance() {
        let content = "2 2\n0 3 1 2\n0 2 1 4\n";
        let instance = parse_instance(&p(), content).unwrap();
        assert_eq!(instance.num_jobs, 2);
        assert_eq!(instance.num_machines, 2);
        assert_eq!(instance.jobs[1].operations[1].duration, 4);
    }

    #[test]
    fn skips_comment_lines() {
        let content = "# a comment\n2 2\n# another\n0 3 1 2\n0 2 1 4\n";
        let instance = parse_instance(&p(), content).unwrap();
        assert_eq!(instance.num_jobs, 2);
    }

    #[test]
    fn rejects_out_of_range_machine() {
        let content = "1 2\n5 3 1 2\n";
        let err = parse_instance(&p(), content).unwrap_err();
        assert!(matches!(err, JsspError::Input { .. }));
    }

    #[test]
    fn rejects_non_positive_duration() {
        let content = "1 1\n0 0\n";
        let err = parse_instance(&p(), content).unwrap_err();
        assert!(matches!(err, JsspError::Input { .. }));
    }

    #[test]
    fn rejects_truncated_operation_data() {
        let content = "1 2\n0 3\n";
        let err = parse_instance(&p(), content).unwrap_err();
        assert!(matches!(err, JsspError::Input { .. }));
    }
}
