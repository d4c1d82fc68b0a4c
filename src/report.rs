//! Console rendering of a finished run.
//!
//! Process numbers shown to users are 1-based; job ids stay 0-based
//! everywhere else.

use std::fmt;

use crate::sim::{Aggregate, JobId, SimReport};

/// `[Process-1] -> [Process-3] -> [Process-2]`
pub struct CompletionOrder<'a>(pub &'a [JobId]);

impl fmt::Display for CompletionOrder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Order of completion: ")?;
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "[Process-{}]", id + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "average waiting time: {:.2}", self.waiting.mean)?;
        writeln!(f, "minimum waiting time: {:.2}", self.waiting.min)?;
        writeln!(f, "maximum waiting time: {:.2}", self.waiting.max)?;
        writeln!(f, "average turnaround time: {:.2}", self.turnaround.mean)?;
        writeln!(f, "minimum turnaround time: {:.2}", self.turnaround.min)?;
        write!(f, "maximum turnaround time: {:.2}", self.turnaround.max)
    }
}

/// Per-job table in job id order.
pub struct JobTable<'a>(pub &'a SimReport);

impl fmt::Display for JobTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<10} {:>8} {:>6} {:>8} {:>11} {:>9} {:>10}",
            "Process", "Arrival", "Burst", "Waiting", "Turnaround", "Response", "Completed"
        )?;
        for instance in &self.0.jobs {
            let dash = || "-".to_string();
            writeln!(
                f,
                "{:<10} {:>8} {:>6} {:>8} {:>11} {:>9} {:>10}",
                format!("Process-{}", instance.job.id + 1),
                instance.job.arrival_time,
                instance.job.burst_time,
                instance.waiting_time,
                instance.turnaround_time.map_or_else(dash, |t| t.to_string()),
                instance.response_time().map_or_else(dash, |t| t.to_string()),
                instance.completion_time.map_or_else(dash, |t| t.to_string()),
            )?;
        }
        Ok(())
    }
}
