//! Tick-level model of a hybrid Round-Robin / Shortest-Job-First CPU
//! scheduler.
//!
//! A lone runnable task gets a bounded round-robin slice; once two or more
//! tasks contend, the one with the least remaining burst is run to
//! completion, ties going to the earliest admitted. [`Sim`] drives rounds
//! until every job finishes and reports waiting, turnaround and response
//! times along with the completion order.

pub mod config;
pub mod core;
pub mod error;
pub mod report;
pub mod scheduler;
pub mod sim;

pub use config::{QuantumCarry, SimConfig};
pub use crate::core::SchedCoreEvent;
pub use error::{Result, SchedError};
pub use scheduler::{HybridScheduler, RoundRobinScheduler, Scheduler};
pub use sim::{Job, Sim, SimReport};
