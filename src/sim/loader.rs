//! Task table parser.
//!
//! One record per line, `<arrival> <burst>`, fields separated by spaces or
//! tabs. Reading stops at the first blank line; anything after it is
//! ignored. Job ids are assigned from record position, starting at zero.

use std::{fs, path::Path};

use tracing::debug;

use super::job::Job;
use crate::{
    core::Ticks,
    error::{Result, SchedError},
};

pub fn load_task_table(path: impl AsRef<Path>) -> Result<Vec<Job>> {
    let input = fs::read_to_string(path.as_ref())?;
    parse_task_table(&input)
}

pub fn parse_task_table(input: &str) -> Result<Vec<Job>> {
    let mut jobs = Vec::new();

    for (index, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            break;
        }
        let line_no = index + 1;
        let mut fields = line.split([' ', '\t']).filter(|field| !field.is_empty());

        let arrival_time = parse_field(line_no, "arrival time", fields.next())?;
        let burst_time = parse_field(line_no, "burst time", fields.next())?;
        if let Some(extra) = fields.next() {
            return Err(SchedError::invalid_input(
                line_no,
                format!("unexpected trailing field {extra:?}"),
            ));
        }
        if burst_time == 0 {
            return Err(SchedError::invalid_input(
                line_no,
                "burst time must be positive",
            ));
        }

        jobs.push(Job {
            id: jobs.len(),
            arrival_time,
            burst_time,
        });
    }

    if jobs.is_empty() {
        return Err(SchedError::EmptyTable);
    }
    debug!(records = jobs.len(), "loaded task table");
    Ok(jobs)
}

fn parse_field(line: usize, name: &str, field: Option<&str>) -> Result<Ticks> {
    let field = field.ok_or_else(|| SchedError::invalid_input(line, format!("missing {name}")))?;

    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SchedError::invalid_input(
            line,
            format!("{name} {field:?} is not a non-negative integer"),
        ));
    }
    field
        .parse()
        .map_err(|_| SchedError::invalid_input(line, format!("{name} {field:?} is out of range")))
}
