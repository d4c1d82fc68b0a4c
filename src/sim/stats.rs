//! Aggregate waiting and turnaround figures over a finished run.

use average::{Estimate, Max, Mean, Min};

use super::job::JobInstance;

/// Average, minimum and maximum of one per-job metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spread {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl Spread {
    /// `None` when `samples` is empty.
    pub fn from_samples(samples: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut mean = Mean::new();
        let mut min = Min::new();
        let mut max = Max::new();

        for sample in samples {
            mean.add(sample);
            min.add(sample);
            max.add(sample);
        }

        if mean.len() == 0 {
            return None;
        }
        Some(Self {
            mean: mean.estimate(),
            min: min.estimate(),
            max: max.estimate(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub waiting: Spread,
    pub turnaround: Spread,
}

impl Aggregate {
    /// Aggregates over completed jobs only; `None` if nothing completed.
    pub fn from_jobs(jobs: &[JobInstance]) -> Option<Self> {
        let completed = || jobs.iter().filter(|job| job.is_completed());

        Some(Self {
            waiting: Spread::from_samples(completed().map(|job| job.waiting_time as f64))?,
            turnaround: Spread::from_samples(
                completed().filter_map(|job| job.turnaround_time.map(|t| t as f64)),
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::job::Job;

    fn finished(id: usize, waiting: u64, turnaround: u64) -> JobInstance {
        let mut job = JobInstance::new(Job {
            id,
            arrival_time: 0,
            burst_time: turnaround - waiting,
        });
        job.waiting_time = waiting;
        job.turnaround_time = Some(turnaround);
        job.completion_time = Some(turnaround);
        job
    }

    #[test]
    fn spread_of_empty_input_is_none() {
        assert_eq!(Spread::from_samples(std::iter::empty()), None);
        assert_eq!(Aggregate::from_jobs(&[]), None);
    }

    #[test]
    fn aggregates_waiting_and_turnaround() {
        let jobs = [finished(0, 4, 14), finished(1, 4, 8), finished(2, 1, 3)];
        let stats = Aggregate::from_jobs(&jobs).unwrap();

        assert_eq!(stats.waiting.mean, 3.0);
        assert_eq!(stats.waiting.min, 1.0);
        assert_eq!(stats.waiting.max, 4.0);
        assert!((stats.turnaround.mean - 25.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.turnaround.min, 3.0);
        assert_eq!(stats.turnaround.max, 14.0);
    }

    #[test]
    fn unfinished_jobs_are_skipped() {
        let pending = JobInstance::new(Job {
            id: 1,
            arrival_time: 0,
            burst_time: 100,
        });
        let stats = Aggregate::from_jobs(&[finished(0, 2, 5), pending]).unwrap();
        assert_eq!(stats.waiting.max, 2.0);
        assert_eq!(stats.turnaround.max, 5.0);
    }
}
