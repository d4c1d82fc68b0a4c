use super::{Rule, Scheduler, Selection};
use crate::{
    config::SimConfig,
    core::{SchedCtx, TaskId, Ticks},
};

/// Plain round-robin baseline: rotate through the ready queue in admission
/// order, giving each uncompleted task at most one quantum per turn.
pub struct RoundRobinScheduler {
    quantum: Ticks,
    last: Option<TaskId>,
}

impl Scheduler for RoundRobinScheduler {
    fn init(config: &SimConfig) -> Self {
        Self {
            quantum: config.quantum,
            last: None,
        }
    }

    fn select(&mut self, ctx: &SchedCtx) -> Option<Selection> {
        let queue: Vec<TaskId> = ctx.ready.members().collect();
        let start = self
            .last
            .and_then(|last| queue.iter().position(|&id| id == last))
            .map_or(0, |pos| pos + 1);

        let task = queue[start..]
            .iter()
            .chain(&queue[..start])
            .map(|&id| ctx.task(id))
            .find(|task| !task.is_completed())?;

        self.last = Some(task.id);
        Some(Selection {
            task: task.id,
            quantum: task.remaining_burst.min(self.quantum),
            rule: Rule::RoundRobin,
        })
    }
}
