pub mod driver;
pub mod job;
pub mod loader;
pub mod stats;
pub mod workload;

pub use driver::{Sim, SimReport};
pub use job::{Job, JobId, JobInstance};
pub use loader::{load_task_table, parse_task_table};
pub use stats::{Aggregate, Spread};
pub use workload::bernoulli_jobs;
