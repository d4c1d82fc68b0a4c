//! hybrid_sched — simulate the hybrid RR/SJF scheduler over a task table.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use hybrid_sched::{
    HybridScheduler, Job, QuantumCarry, RoundRobinScheduler, Scheduler, Sim, SimConfig,
    SimReport,
    report::{CompletionOrder, JobTable},
    scheduler::DEFAULT_QUANTUM,
    sim::{bernoulli_jobs, load_task_table},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum Policy {
    /// Round-robin slice for a lone task, shortest job first under contention.
    #[default]
    Hybrid,
    /// Plain round-robin baseline.
    Rr,
}

/// Simulate a hybrid Round-Robin / Shortest-Job-First scheduler.
#[derive(Parser)]
#[command(name = "hybrid_sched")]
struct Cli {
    /// Task table: one `<arrival> <burst>` record per line, ending at the
    /// first blank line.
    #[arg(required_unless_present = "generate")]
    tasks: Option<PathBuf>,

    /// Default time quantum in ticks.
    #[arg(short, long, env = "HYBRID_SCHED_QUANTUM", default_value_t = DEFAULT_QUANTUM)]
    quantum: u64,

    #[arg(long, value_enum, default_value_t = Policy::Hybrid)]
    policy: Policy,

    /// Cap shortest-job picks at one quantum instead of running them to
    /// completion.
    #[arg(long)]
    cap_sjf: bool,

    /// Carry the previous round's quantum into the next decision instead of
    /// resetting it to the default.
    #[arg(long)]
    persist_quantum: bool,

    /// Generate a random task table spanning this many ticks instead of
    /// reading one.
    #[arg(long, value_name = "TICKS", conflicts_with = "tasks")]
    generate: Option<u64>,

    /// Seed for --generate.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Print the per-process table.
    #[arg(long)]
    table: bool,

    /// Print every scheduling event.
    #[arg(long)]
    trace: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.quantum == 0 {
        bail!("--quantum must be at least 1");
    }

    let jobs = match (&cli.tasks, cli.generate) {
        (_, Some(ticks)) => bernoulli_jobs(ticks, 0.3, 0.3, 2, 6, cli.seed),
        (Some(path), None) => load_task_table(path)
            .with_context(|| format!("failed to load task table {}", path.display()))?,
        (None, None) => bail!("no task table given"),
    };
    if jobs.is_empty() {
        bail!("generated task table is empty; try a longer --generate span");
    }

    let carry = if cli.persist_quantum {
        QuantumCarry::Persist
    } else {
        QuantumCarry::Reset
    };
    let config = SimConfig::default()
        .with_quantum(cli.quantum)
        .with_sjf_cap(cli.cap_sjf)
        .with_quantum_carry(carry);

    let report = match cli.policy {
        Policy::Hybrid => simulate::<HybridScheduler>(jobs, config, cli.trace)?,
        Policy::Rr => simulate::<RoundRobinScheduler>(jobs, config, cli.trace)?,
    };

    if cli.table {
        println!("{}", JobTable(&report));
    }
    if let Some(stats) = &report.stats {
        println!("{stats}");
    }
    println!("{}", CompletionOrder(&report.completion_order));

    Ok(())
}

fn simulate<S: Scheduler>(jobs: Vec<Job>, config: SimConfig, trace: bool) -> Result<SimReport> {
    let mut sim = Sim::<S>::new(jobs, config).context("failed to set up simulation")?;

    while !sim.all_jobs_completed() {
        let now = sim.now();
        let events = sim.step();
        if trace {
            for event in events {
                println!("t={now} {event:?}");
            }
        }
    }

    Ok(sim.report())
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
