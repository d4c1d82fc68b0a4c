pub mod hybrid;
pub mod rr;

use crate::{
    config::SimConfig,
    core::{
        Ticks,
        state::{SchedCtx, TaskId},
    },
};
pub use hybrid::HybridScheduler;
pub use rr::RoundRobinScheduler;

pub const DEFAULT_QUANTUM: Ticks = 5;

/// Which branch of the policy produced a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Bounded slice, re-evaluated after `quantum` ticks.
    RoundRobin,
    /// Shortest remaining burst picked under contention.
    ShortestJob,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub task: TaskId,
    pub quantum: Ticks,
    pub rule: Rule,
}

pub trait Scheduler {
    fn init(config: &SimConfig) -> Self;

    /// Pick the next task and how many ticks it runs before the next
    /// decision. `None` means nothing is runnable and the CPU idles for a
    /// tick.
    fn select(&mut self, ctx: &SchedCtx) -> Option<Selection>;

    fn completed(&mut self, _ctx: &SchedCtx, _task: TaskId) {}
}
