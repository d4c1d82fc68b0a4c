use tracing::info;

use super::{
    job::{Job, JobId, JobInstance},
    stats::Aggregate,
};
use crate::{
    config::SimConfig,
    core::{
        driver::SchedCore,
        event::SchedCoreEvent,
        state::{TaskId, Ticks},
    },
    error::{Result, SchedError},
    scheduler::Scheduler,
};

pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
    pub jobs: Vec<JobInstance>,
}

/// Final per-job figures, completion order and aggregates of one run.
#[derive(Debug, Clone)]
pub struct SimReport {
    pub jobs: Vec<JobInstance>,
    pub completion_order: Vec<JobId>,
    pub stats: Option<Aggregate>,
    pub makespan: Ticks,
}

impl<S: Scheduler> Sim<S> {
    /// Task ids follow the order of `jobs`, which is also the admission
    /// tie-break for equal arrival times.
    pub fn new(jobs: Vec<Job>, config: SimConfig) -> Result<Self> {
        let mut core = SchedCore::<S>::new(&config, jobs.len())?;

        for (index, job) in jobs.iter().enumerate() {
            if job.burst_time == 0 {
                return Err(SchedError::invalid_input(
                    index + 1,
                    "burst time must be positive",
                ));
            }
            let task_id = core.ctx.create_task(job.arrival_time, job.burst_time);
            debug_assert_eq!(task_id, index, "TaskId must match job index");
        }

        Ok(Self {
            core,
            jobs: jobs.into_iter().map(JobInstance::new).collect(),
        })
    }

    /// Run one scheduling round and fold its results back into `jobs`.
    pub fn step(&mut self) -> Vec<SchedCoreEvent> {
        let events = self.core.round();

        for event in &events {
            match *event {
                SchedCoreEvent::Dispatched { task, .. } | SchedCoreEvent::Completed { task, .. } => {
                    self.sync_job(task)
                }
                _ => {}
            }
        }

        events
    }

    fn sync_job(&mut self, task_id: TaskId) {
        let task = self.core.ctx.task(task_id);
        let job = &mut self.jobs[task_id];
        job.start_time = task.response_time.map(|resp| task.arrival_time + resp);
        job.waiting_time = task.waiting_time;
        job.turnaround_time = task.turnaround_time;
        job.completion_time = task.completion_time;
    }

    pub fn run(mut self) -> SimReport {
        while !self.all_jobs_completed() {
            self.step();
        }
        let report = self.report();
        info!(
            jobs = report.jobs.len(),
            makespan = report.makespan,
            "simulation finished"
        );
        report
    }

    pub fn all_jobs_completed(&self) -> bool {
        self.core.ctx.all_completed()
    }

    pub fn now(&self) -> Ticks {
        self.core.now()
    }

    pub fn remaining(&self, job: JobId) -> Ticks {
        self.core.ctx.task(job).remaining_burst
    }

    pub fn jobs_map<T>(&self, f: impl Fn(&JobInstance) -> T) -> impl Iterator<Item = T> {
        self.jobs.iter().map(f)
    }

    pub fn completion_order(&self) -> Vec<JobId> {
        self.core
            .ctx
            .completed
            .iter()
            .map(|&task| self.jobs[task].job.id)
            .collect()
    }

    pub fn report(&self) -> SimReport {
        SimReport {
            jobs: self.jobs.clone(),
            completion_order: self.completion_order(),
            stats: Aggregate::from_jobs(&self.jobs),
            makespan: self.now(),
        }
    }
}
