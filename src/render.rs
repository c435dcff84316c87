//! Textual Gantt-chart rendering: one row per machine, a configurable block
//! of time units per character, job labels `J<idx>`.

use crate::schedule::Schedule;

/// Renders a textual Gantt chart for `schedule`. `block_size` is the number
/// of time units each character column represents; a machine row shows the
/// label of whichever job occupies that column's time span, or blank if the
/// machine is idle throughout it.
pub fn gantt_chart(schedule: &Schedule, num_machines: usize, block_size: u32) -> String {
    let block_size = block_size.max(1);
    let makespan = schedule.makespan();
    let blocks = makespan.div_ceil(block_size);

    let mut out = String::new();
    out.push_str(&format!("\n# Gantt Chart (1 char = {block_size} time units)\n"));

    for machine in 0..num_machines {
        out.push_str(&format!("Machine {machine:2} |"));
        for b in 0..blocks {
            let t_start = b * block_size;
            let t_end = t_start + block_size;
            let occupant = schedule.ops.iter().enumerate().find_map(|(job, row)| {
                row.iter()
                    .find(|op| op.machine == machine && op.start < t_end && op.end > t_start)
                    .map(|_| format!("J{job}"))
            });
            match occupant {
                Some(label) => out.push_str(&label),
                None => out.push_str("  "),
            }
        }
        out.push_str("|\n");
    }

    out.push_str("\nTime       ");
    for b in 0..blocks {
        let label = b * block_size;
        if label < 10 {
            out.push_str(&format!("  {label}"));
        } else if label < 100 {
            out.push_str(&format!(" {label}"));
        } else {
            out.push_str(&label.to_string());
        }
    }
    out.push_str(&format!(" {makespan}\n"));
    out
}
