use super::state::{SchedCtx, TaskState, Ticks};

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
    last_now: Option<Ticks>,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks observed so far.
    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SchedCtx) {
        self.step += 1;

        if let Some(last) = self.last_now {
            debug_assert!(
                ctx.now > last,
                "clock went from {last} to {} without advancing",
                ctx.now
            );
        }
        self.last_now = Some(ctx.now);

        let running: Vec<_> = ctx
            .tasks
            .iter()
            .filter(|task| task.state == TaskState::Running)
            .map(|task| task.id)
            .collect();
        debug_assert!(
            running.len() <= 1,
            "more than one running task: {running:?}"
        );
        if let Some(&task_id) = running.first() {
            debug_assert_eq!(
                ctx.current,
                Some(task_id),
                "Running task {task_id} is not the current task"
            );
        }

        for task in &ctx.tasks {
            let task_id = task.id;
            match task.state {
                TaskState::NotArrived => debug_assert!(
                    !ctx.ready.contains(task_id),
                    "Task {task_id} queued before arrival"
                ),
                TaskState::Completed => {
                    debug_assert_eq!(
                        task.remaining_burst, 0,
                        "Completed task {task_id} still has service left"
                    );
                    debug_assert_eq!(
                        task.turnaround_time,
                        Some(task.burst_time + task.waiting_time),
                        "Task {task_id} turnaround disagrees with burst + wait"
                    );
                    debug_assert!(
                        !task.pending_reconcile(),
                        "Completed task {task_id} left a wait unreconciled"
                    );
                }
                _ => debug_assert!(
                    ctx.ready.contains(task_id),
                    "Task {task_id} is {:?} but not in the ready queue",
                    task.state
                ),
            }

            if task.pending_reconcile() {
                debug_assert_eq!(
                    task.state,
                    TaskState::Preempted,
                    "Task {task_id} pending reconciliation while not preempted"
                );
            }
        }

        debug_assert_eq!(
            ctx.completed.len(),
            ctx.tasks.iter().filter(|task| task.is_completed()).count(),
            "completion record out of sync with task states"
        );
    }
}
