//! Round-robin with an opportunistic shortest-job-first rule.
//!
//! A lone contender gets a bounded round-robin slice. As soon as two or more
//! tasks are runnable the one with the least remaining burst is picked and,
//! unless `sjf_cap` is set, kept on the CPU until it finishes. Ties on
//! remaining burst go to whichever task was admitted first.

use tracing::debug;

use super::{Rule, Scheduler, Selection};
use crate::{
    config::{QuantumCarry, SimConfig},
    core::{SchedCtx, Task, Ticks},
};

pub struct HybridScheduler {
    default_quantum: Ticks,
    sjf_cap: bool,
    carry: QuantumCarry,
    // Threshold for the next single-contender round
    quantum: Ticks,
}

impl HybridScheduler {
    fn slice_for(&self, task: &Task) -> Ticks {
        let threshold = match self.carry {
            QuantumCarry::Reset => self.default_quantum,
            QuantumCarry::Persist => self.quantum,
        };
        if threshold >= task.remaining_burst {
            task.remaining_burst
        } else {
            self.default_quantum
        }
    }
}

/// First task with the smallest remaining burst, in admission order.
pub fn shortest_remaining<'a>(tasks: impl Iterator<Item = &'a Task>) -> Option<&'a Task> {
    tasks.min_by_key(|task| task.remaining_burst)
}

impl Scheduler for HybridScheduler {
    fn init(config: &SimConfig) -> Self {
        Self {
            default_quantum: config.quantum,
            sjf_cap: config.sjf_cap,
            carry: config.quantum_carry,
            quantum: config.quantum,
        }
    }

    fn select(&mut self, ctx: &SchedCtx) -> Option<Selection> {
        let contenders = ctx.count_uncompleted();

        let selection = match contenders {
            0 => return None,
            1 => {
                let task = ctx.runnable().next()?;
                Selection {
                    task: task.id,
                    quantum: self.slice_for(task),
                    rule: Rule::RoundRobin,
                }
            }
            _ => {
                let task = shortest_remaining(ctx.runnable())?;
                let quantum = if self.sjf_cap {
                    task.remaining_burst.min(self.default_quantum)
                } else {
                    task.remaining_burst
                };
                Selection {
                    task: task.id,
                    quantum,
                    rule: Rule::ShortestJob,
                }
            }
        };

        debug!(
            contenders,
            task = selection.task,
            quantum = selection.quantum,
            rule = ?selection.rule,
            "hybrid select"
        );
        self.quantum = selection.quantum;
        Some(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_at(now: Ticks, specs: &[(Ticks, Ticks)]) -> SchedCtx {
        let mut ctx = SchedCtx::with_capacity(specs.len()).unwrap();
        for &(arrival, burst) in specs {
            ctx.create_task(arrival, burst);
        }
        ctx.advance_time(now);
        ctx.admit_arrivals();
        ctx
    }

    #[test]
    fn empty_queue_selects_nothing() {
        let ctx = ctx_at(0, &[(3, 2)]);
        let mut sched = HybridScheduler::init(&SimConfig::default());
        assert_eq!(sched.select(&ctx), None);
    }

    #[test]
    fn lone_short_task_runs_to_completion() {
        let ctx = ctx_at(0, &[(0, 3)]);
        let mut sched = HybridScheduler::init(&SimConfig::default());
        let pick = sched.select(&ctx).unwrap();
        assert_eq!(pick.task, 0);
        assert_eq!(pick.quantum, 3);
        assert_eq!(pick.rule, Rule::RoundRobin);
    }

    #[test]
    fn lone_long_task_gets_default_slice() {
        let ctx = ctx_at(0, &[(0, 20)]);
        let mut sched = HybridScheduler::init(&SimConfig::default());
        assert_eq!(sched.select(&ctx).unwrap().quantum, 5);
    }

    #[test]
    fn contention_picks_shortest_uncapped() {
        let ctx = ctx_at(2, &[(0, 9), (1, 7), (2, 12)]);
        let mut sched = HybridScheduler::init(&SimConfig::default());
        let pick = sched.select(&ctx).unwrap();
        assert_eq!(pick.task, 1);
        assert_eq!(pick.quantum, 7);
        assert_eq!(pick.rule, Rule::ShortestJob);
    }

    #[test]
    fn contention_respects_cap_when_configured() {
        let ctx = ctx_at(2, &[(0, 9), (1, 7)]);
        let mut sched = HybridScheduler::init(&SimConfig::default().with_sjf_cap(true));
        let pick = sched.select(&ctx).unwrap();
        assert_eq!(pick.task, 1);
        assert_eq!(pick.quantum, 5);
    }

    #[test]
    fn ties_go_to_earliest_admitted() {
        // Task 2 arrives first, so it sits ahead of 0 and 1 in the queue.
        let mut ctx = SchedCtx::with_capacity(3).unwrap();
        ctx.create_task(2, 4);
        ctx.create_task(1, 4);
        ctx.create_task(0, 4);
        for _ in 0..=2 {
            ctx.admit_arrivals();
            ctx.advance_time(1);
        }

        let mut sched = HybridScheduler::init(&SimConfig::default());
        assert_eq!(sched.select(&ctx).unwrap().task, 2);
    }

    #[test]
    fn completed_tasks_are_ignored() {
        let mut ctx = ctx_at(0, &[(0, 1), (0, 6)]);
        ctx.set_running(0);
        ctx.task_mut(0).remaining_burst = 0;
        ctx.mark_completed(0);

        let mut sched = HybridScheduler::init(&SimConfig::default());
        let pick = sched.select(&ctx).unwrap();
        assert_eq!(pick.task, 1);
        assert_eq!(pick.rule, Rule::RoundRobin);
        assert_eq!(pick.quantum, 5);
    }

    #[test]
    fn persisted_quantum_feeds_next_lone_round() {
        let config = SimConfig::default().with_quantum_carry(QuantumCarry::Persist);
        let mut sched = HybridScheduler::init(&config);

        // A long SJF pick raises the carried threshold...
        let contended = ctx_at(0, &[(0, 8), (0, 9)]);
        assert_eq!(sched.select(&contended).unwrap().quantum, 8);

        // ...so a lone 7-tick task now runs to completion instead of a slice.
        let lone = ctx_at(0, &[(0, 7)]);
        assert_eq!(sched.select(&lone).unwrap().quantum, 7);

        let mut reset = HybridScheduler::init(&SimConfig::default());
        reset.select(&contended);
        assert_eq!(reset.select(&lone).unwrap().quantum, 5);
    }
}
