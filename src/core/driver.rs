use tracing::{debug, trace};

use super::{
    event::SchedCoreEvent,
    observer::Observer,
    state::{SchedCtx, TaskId, TaskState, Ticks},
};
use crate::{
    config::SimConfig,
    error::Result,
    scheduler::{Scheduler, Selection},
};

pub struct SchedCore<S: Scheduler> {
    pub ctx: SchedCtx,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(config: &SimConfig, num_tasks: usize) -> Result<Self> {
        config.validate()?;
        let ctx = SchedCtx::with_capacity(num_tasks)?;
        let scheduler = S::init(config);
        Ok(Self {
            ctx,
            scheduler,
            observer: Observer::new(),
        })
    }

    /// One scheduling decision plus the ticks it buys. An empty queue costs
    /// a single idle tick.
    pub fn round(&mut self) -> Vec<SchedCoreEvent> {
        let mut events = Vec::new();
        self.admit(&mut events);

        let Some(selection) = self.scheduler.select(&self.ctx) else {
            let at = self.ctx.now;
            debug!(now = at, "no runnable task, idling");
            events.push(SchedCoreEvent::Idle { at });
            self.ctx.advance_time(1);
            self.ctx.refresh_waiting();
            self.observer.observe(&self.ctx);
            return events;
        };

        self.dispatch(selection, &mut events);
        for _ in 0..selection.quantum {
            if self.tick(selection.task, &mut events) {
                break;
            }
        }

        // Waits of idle tasks must be current before the next decision
        self.ctx.refresh_waiting();
        events
    }

    fn admit(&mut self, events: &mut Vec<SchedCoreEvent>) {
        let at = self.ctx.now;
        for task in self.ctx.admit_arrivals() {
            trace!(task, at, "admitted");
            events.push(SchedCoreEvent::Admitted { task, at });
        }
    }

    fn dispatch(&mut self, selection: Selection, events: &mut Vec<SchedCoreEvent>) {
        let Selection {
            task,
            quantum,
            rule,
        } = selection;

        if let Some(prev) = self.ctx.current.filter(|&prev| prev != task) {
            debug!(task = prev, now = self.ctx.now, "preempted");
            self.ctx.preempt(prev);
            events.push(SchedCoreEvent::TaskStateChange {
                task: prev,
                from: TaskState::Running,
                to: TaskState::Preempted,
            });
        }

        let from = self.ctx.set_running(task);
        if from != TaskState::Running {
            events.push(SchedCoreEvent::TaskStateChange {
                task,
                from,
                to: TaskState::Running,
            });
        }

        debug!(task, quantum, ?rule, now = self.ctx.now, "dispatch");
        events.push(SchedCoreEvent::Dispatched {
            task,
            quantum,
            rule,
        });
    }

    // Return true if the task completed during this tick
    fn tick(&mut self, task_id: TaskId, events: &mut Vec<SchedCoreEvent>) -> bool {
        let now = self.ctx.now;

        // In its own block to avoid double-mutable-borrow
        let completed = {
            let task = self.ctx.task_mut(task_id);
            if task.response_time.is_none() {
                task.response_time = Some(now - task.arrival_time);
            }
            if let Some(since) = task.preempted_at.take() {
                task.waiting_time += now - since;
            }
            task.remaining_burst -= 1;
            task.remaining_burst == 0
        };

        if completed {
            self.ctx.mark_completed(task_id);
            self.scheduler.completed(&self.ctx, task_id);
            let task = self.ctx.task(task_id);
            debug!(
                task = task_id,
                waiting = task.waiting_time,
                turnaround = task.turnaround_time,
                "completed"
            );
            events.push(SchedCoreEvent::TaskStateChange {
                task: task_id,
                from: TaskState::Running,
                to: TaskState::Completed,
            });
            events.push(SchedCoreEvent::Completed {
                task: task_id,
                at: now + 1,
            });
        }

        self.admit(events);
        self.ctx.refresh_waiting();
        self.ctx.advance_time(1);
        self.observer.observe(&self.ctx);

        completed
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
