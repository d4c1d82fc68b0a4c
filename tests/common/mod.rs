#![allow(dead_code)]

use hybrid_sched::{
    HybridScheduler, Job, Scheduler, SchedCoreEvent, Sim, SimConfig, SimReport,
    sim::JobInstance,
};

/// Initialize tracing from `RUST_LOG`.
///
/// `try_init()` is idempotent: first call in the process succeeds,
/// subsequent calls are silently ignored.
pub fn setup_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn jobs(specs: &[(u64, u64)]) -> Vec<Job> {
    specs
        .iter()
        .enumerate()
        .map(|(id, &(arrival_time, burst_time))| Job {
            id,
            arrival_time,
            burst_time,
        })
        .collect()
}

pub fn run<S: Scheduler>(specs: &[(u64, u64)], config: SimConfig) -> SimReport {
    Sim::<S>::new(jobs(specs), config)
        .expect("valid task table")
        .run()
}

pub fn run_hybrid(specs: &[(u64, u64)]) -> SimReport {
    run::<HybridScheduler>(specs, SimConfig::default())
}

/// Step to completion, returning every event emitted along the way.
pub fn run_events<S: Scheduler>(
    specs: &[(u64, u64)],
    config: SimConfig,
) -> (SimReport, Vec<SchedCoreEvent>) {
    let mut sim = Sim::<S>::new(jobs(specs), config).expect("valid task table");
    let mut events = Vec::new();
    while !sim.all_jobs_completed() {
        events.extend(sim.step());
    }
    (sim.report(), events)
}

/// (waiting, turnaround, response, completion)
pub fn outcome(job: &JobInstance) -> (u64, u64, u64, u64) {
    (
        job.waiting_time,
        job.turnaround_time.expect("job completed"),
        job.response_time().expect("job dispatched"),
        job.completion_time.expect("job completed"),
    )
}

/// Invariants every finished run must satisfy.
pub fn assert_consistent(report: &SimReport) {
    let mut order = report.completion_order.clone();
    order.sort_unstable();
    assert_eq!(
        order,
        (0..report.jobs.len()).collect::<Vec<_>>(),
        "completion order must be a permutation of job ids"
    );

    for instance in &report.jobs {
        let (waiting, turnaround, response, completion) = outcome(instance);
        let job = &instance.job;
        assert_eq!(
            turnaround,
            job.burst_time + waiting,
            "job {} turnaround != burst + waiting",
            job.id
        );
        assert_eq!(
            turnaround,
            completion - job.arrival_time,
            "job {} turnaround != completion - arrival",
            job.id
        );
        assert!(
            response + job.burst_time <= turnaround,
            "job {} responded after it could have finished",
            job.id
        );
        assert!(completion <= report.makespan);
    }
}
