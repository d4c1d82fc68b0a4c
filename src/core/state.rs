use rustc_hash::FxHashSet;
use tracing::trace;

use crate::error::{Result, SchedError};

// Index into Task Vec
pub type TaskId = usize;
pub type Ticks = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    NotArrived,
    Ready,
    Running,
    Preempted,
    Completed,
}

#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub state: TaskState,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub remaining_burst: Ticks,
    pub waiting_time: Ticks,
    pub turnaround_time: Option<Ticks>,
    pub response_time: Option<Ticks>,
    pub admitted_at: Option<Ticks>,
    // Clock value at the end of the tick that drained the burst
    pub completion_time: Option<Ticks>,
    // Set while preempted and not yet serviced again; doubles as the
    // pending waiting-time reconciliation flag.
    pub(crate) preempted_at: Option<Ticks>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.state == TaskState::Completed
    }

    pub fn pending_reconcile(&self) -> bool {
        self.preempted_at.is_some()
    }
}

/// Admitted tasks in admission order.
///
/// Entries are never removed; completed tasks stay in place and are
/// filtered out by state, so queue position doubles as the FIFO tie-break.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    order: Vec<TaskId>,
    members: FxHashSet<TaskId>,
}

impl ReadyQueue {
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut queue = Self::default();
        queue
            .order
            .try_reserve_exact(capacity)
            .and_then(|()| queue.members.try_reserve(capacity))
            .map_err(|source| SchedError::ResourceExhaustion {
                tasks: capacity,
                source,
            })?;
        Ok(queue)
    }

    /// Append `task` unless it is already queued or has completed.
    pub fn admit(&mut self, task: &Task) -> bool {
        if task.is_completed() || !self.members.insert(task.id) {
            return false;
        }
        self.order.push(task.id);
        true
    }

    pub fn members(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.order.iter().copied()
    }

    pub fn contains(&self, task_id: TaskId) -> bool {
        self.members.contains(&task_id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn count_uncompleted(&self, tasks: &[Task]) -> usize {
        self.members()
            .filter(|&id| !tasks[id].is_completed())
            .count()
    }
}

/// Everything one simulation run mutates: the task arena, the ready queue
/// and the logical clock.
#[derive(Debug)]
pub struct SchedCtx {
    pub now: Ticks,
    pub tasks: Vec<Task>,
    pub ready: ReadyQueue,
    pub current: Option<TaskId>,
    pub completed: Vec<TaskId>,
}

impl SchedCtx {
    pub fn with_capacity(num_tasks: usize) -> Result<Self> {
        Ok(Self {
            now: 0,
            tasks: Vec::with_capacity(num_tasks),
            ready: ReadyQueue::with_capacity(num_tasks)?,
            current: None,
            completed: Vec::with_capacity(num_tasks),
        })
    }

    pub fn create_task(&mut self, arrival_time: Ticks, burst_time: Ticks) -> TaskId {
        let id = self.tasks.len();
        debug_assert!(burst_time > 0, "Task {id} must require some service");

        self.tasks.push(Task {
            id,
            state: TaskState::NotArrived,
            arrival_time,
            burst_time,
            remaining_burst: burst_time,
            waiting_time: 0,
            turnaround_time: None,
            response_time: None,
            admitted_at: None,
            completion_time: None,
            preempted_at: None,
        });

        id
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    /// Admit every task whose arrival time has been reached, in task-table
    /// order. Returns the newly admitted ids; calling again at the same
    /// clock value admits nothing.
    pub fn admit_arrivals(&mut self) -> Vec<TaskId> {
        let now = self.now;
        let mut admitted = Vec::new();

        for task in &mut self.tasks {
            if task.state != TaskState::NotArrived || task.arrival_time > now {
                continue;
            }
            if self.ready.admit(task) {
                task.state = TaskState::Ready;
                task.admitted_at = Some(now);
                admitted.push(task.id);
            }
        }

        admitted
    }

    pub fn task(&self, task_id: TaskId) -> &Task {
        &self.tasks[task_id]
    }

    pub fn task_mut(&mut self, task_id: TaskId) -> &mut Task {
        &mut self.tasks[task_id]
    }

    /// Uncompleted ready-queue entries in admission order.
    pub fn runnable(&self) -> impl Iterator<Item = &Task> + '_ {
        self.ready
            .members()
            .map(|id| &self.tasks[id])
            .filter(|task| !task.is_completed())
    }

    pub fn count_uncompleted(&self) -> usize {
        self.ready.count_uncompleted(&self.tasks)
    }

    pub fn all_completed(&self) -> bool {
        self.completed.len() == self.tasks.len()
    }

    // Return previous state
    pub fn set_running(&mut self, task_id: TaskId) -> TaskState {
        debug_assert!(
            self.ready.contains(task_id),
            "Task {task_id} dispatched before admission"
        );
        debug_assert!(
            self.current.is_none() || self.current == Some(task_id),
            "CPU already running task {:?}",
            self.current
        );

        self.current = Some(task_id);
        let task = self.task_mut(task_id);
        let prev_state = task.state;
        task.state = TaskState::Running;
        prev_state
    }

    /// Take the CPU away from a running task. Its waiting time stops being
    /// recomputed and is reconciled once it is serviced again.
    pub fn preempt(&mut self, task_id: TaskId) {
        let now = self.now;
        let task = self.task_mut(task_id);
        debug_assert_eq!(
            task.state,
            TaskState::Running,
            "Task {task_id} must be running to be preempted"
        );

        task.state = TaskState::Preempted;
        if task.preempted_at.is_none() {
            task.preempted_at = Some(now);
        }
        if self.current == Some(task_id) {
            self.current = None;
        }
    }

    /// Called from inside the tick that drained the burst, before the clock
    /// advances.
    pub fn mark_completed(&mut self, task_id: TaskId) {
        let now = self.now;
        let task = &mut self.tasks[task_id];
        debug_assert!(
            task.state == TaskState::Running,
            "Task {task_id} must have been running before marked complete"
        );
        debug_assert_eq!(task.remaining_burst, 0);

        task.state = TaskState::Completed;
        task.turnaround_time = Some(task.burst_time + task.waiting_time);
        task.completion_time = Some(now + 1);

        if self.current == Some(task_id) {
            self.current = None;
        }
        self.completed.push(task_id);
    }

    /// Recompute the cumulative wait of every admitted task that is neither
    /// running, completed nor awaiting reconciliation.
    pub fn refresh_waiting(&mut self) {
        let now = self.now;
        for id in self.ready.members() {
            let task = &mut self.tasks[id];
            if task.state == TaskState::Ready {
                task.waiting_time = now.saturating_sub(task.arrival_time);
                trace!(task = id, waiting = task.waiting_time, "refresh wait");
            }
        }
    }
}
