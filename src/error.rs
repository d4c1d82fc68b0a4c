use std::collections::TryReserveError;

/// Errors raised before a simulation starts.
///
/// Once a `Sim` has been built from a validated task table the engine
/// itself cannot fail, so every variant here is fatal to the run.
#[derive(Debug, thiserror::Error)]
pub enum SchedError {
    /// A task record is malformed: wrong field count, a field that is not a
    /// non-negative integer, or a zero burst.
    #[error("invalid input detected at line {line}: {reason}")]
    InvalidInput { line: usize, reason: String },

    /// No task records precede the first blank line.
    #[error("task table contains no records")]
    EmptyTable,

    /// Storage for the ready queue could not be reserved.
    #[error("failed to allocate ready queue for {tasks} tasks")]
    ResourceExhaustion {
        tasks: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("failed to read task table")]
    Io(#[from] std::io::Error),
}

impl SchedError {
    pub fn invalid_input(line: usize, reason: impl Into<String>) -> Self {
        SchedError::InvalidInput {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SchedError>;
