use crate::core::state::Ticks;

pub type JobId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobInstance {
    pub job: Job,
    // First dispatch
    pub start_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
    pub waiting_time: Ticks,
    pub turnaround_time: Option<Ticks>,
}

impl JobInstance {
    pub fn new(job: Job) -> Self {
        Self {
            job,
            start_time: None,
            completion_time: None,
            waiting_time: 0,
            turnaround_time: None,
        }
    }

    pub fn response_time(&self) -> Option<Ticks> {
        self.start_time.map(|start| start - self.job.arrival_time)
    }

    pub fn is_completed(&self) -> bool {
        self.completion_time.is_some()
    }
}
