//! Run-time knobs for the scheduling policies.
//!
//! The defaults reproduce the reference hybrid behavior: a five tick
//! round-robin slice, shortest jobs run to completion once picked, and the
//! slice length is reset at the start of every scheduling round.

use crate::{
    core::Ticks,
    error::{Result, SchedError},
    scheduler::DEFAULT_QUANTUM,
};

/// What happens to the quantum chosen in one round when the next round
/// starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuantumCarry {
    /// Every round compares against the configured default quantum.
    #[default]
    Reset,
    /// The previous round's quantum becomes the threshold for the next
    /// single-contender round.
    Persist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    pub quantum: Ticks,
    /// Cap the shortest-job pick at `quantum` ticks instead of running it
    /// to completion.
    pub sjf_cap: bool,
    pub quantum_carry: QuantumCarry,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            sjf_cap: false,
            quantum_carry: QuantumCarry::Reset,
        }
    }
}

impl SimConfig {
    pub fn with_quantum(mut self, quantum: Ticks) -> Self {
        self.quantum = quantum;
        self
    }

    pub fn with_sjf_cap(mut self, sjf_cap: bool) -> Self {
        self.sjf_cap = sjf_cap;
        self
    }

    pub fn with_quantum_carry(mut self, carry: QuantumCarry) -> Self {
        self.quantum_carry = carry;
        self
    }

    /// A zero quantum would let a lone task sit in the CPU without ever
    /// being serviced.
    pub fn validate(&self) -> Result<()> {
        if self.quantum == 0 {
            return Err(SchedError::InvalidConfig(
                "quantum must be at least one tick",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_policy() {
        let config = SimConfig::default();
        assert_eq!(config.quantum, 5);
        assert!(!config.sjf_cap);
        assert_eq!(config.quantum_carry, QuantumCarry::Reset);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_quantum_rejected() {
        let err = SimConfig::default().with_quantum(0).validate().unwrap_err();
        assert!(matches!(err, SchedError::InvalidConfig(_)));
    }
}
