//! Campaign configuration.

use crate::error::{HarnessError, Result};

/// Mutation campaign configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationConfig {
    /// Number of mutated buffers to generate
    pub rounds: usize,
    /// Fewest bytes overwritten per round
    pub min_mutations: usize,
    /// Most bytes overwritten per round (inclusive)
    pub max_mutations: usize,
}

impl MutationConfig {
    /// Check that the bounds describe a non-empty range.
    pub fn validate(&self) -> Result<()> {
        if self.min_mutations > self.max_mutations {
            return Err(HarnessError::InvalidConfig {
                min: self.min_mutations,
                max: self.max_mutations,
            });
        }
        Ok(())
    }
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self { rounds: 1024 * 1200, min_mutations: 1, max_mutations: 9 }
    }
}
