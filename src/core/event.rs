use crate::{
    core::{TaskId, TaskState, Ticks},
    scheduler::Rule,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedCoreEvent {
    Admitted {
        task: TaskId,
        at: Ticks,
    },
    TaskStateChange {
        task: TaskId,
        from: TaskState,
        to: TaskState,
    },
    Dispatched {
        task: TaskId,
        quantum: Ticks,
        rule: Rule,
    },
    Completed {
        task: TaskId,
        at: Ticks,
    },
    // Nothing runnable for this tick
    Idle {
        at: Ticks,
    },
}
