use rand::prelude::*;

use super::job::Job;
use crate::core::Ticks;

/// Synthetic task table: at each of `ticks` time steps a job arrives with
/// probability `p_arrival`, and is short with probability `p_short`.
pub fn bernoulli_jobs(
    ticks: Ticks,
    p_arrival: f64,
    p_short: f64,
    short_ticks: Ticks,
    long_ticks: Ticks,
    seed: u64,
) -> Vec<Job> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut jobs = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst_time = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };

            jobs.push(Job {
                id: jobs.len(),
                arrival_time: t,
                burst_time,
            });
        }
    }

    jobs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_table() {
        assert_eq!(
            bernoulli_jobs(200, 0.3, 0.3, 2, 6, 7),
            bernoulli_jobs(200, 0.3, 0.3, 2, 6, 7)
        );
    }

    #[test]
    fn arrivals_are_ordered_and_ids_positional() {
        let jobs = bernoulli_jobs(300, 0.5, 0.5, 1, 9, 3);
        assert!(!jobs.is_empty());
        for (index, pair) in jobs.windows(2).enumerate() {
            assert!(pair[0].arrival_time < pair[1].arrival_time);
            assert_eq!(pair[0].id, index);
        }
        assert!(jobs.iter().all(|j| j.burst_time == 1 || j.burst_time == 9));
    }
}
