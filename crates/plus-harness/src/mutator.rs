//! Seeded byte mutator.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{config::MutationConfig, error::Result};

/// Overwrites random bytes of a buffer with random values.
///
/// The same seed and config always produce the same sequence of mutations,
/// so a failing round can be replayed from its seed.
#[derive(Debug, Clone)]
pub struct Mutator {
    rng: ChaCha8Rng,
    min_mutations: usize,
    max_mutations: usize,
}

impl Mutator {
    /// Create a mutator from a config and seed.
    pub fn new(config: &MutationConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            min_mutations: config.min_mutations,
            max_mutations: config.max_mutations,
        })
    }

    /// Overwrite between `min_mutations` and `max_mutations` bytes of `buf`.
    ///
    /// Positions are drawn independently, so the same byte may be hit more
    /// than once. Returns the number of writes performed.
    pub fn mutate(&mut self, buf: &mut [u8]) -> usize {
        if buf.is_empty() {
            return 0;
        }

        let count = self.rng.gen_range(self.min_mutations..=self.max_mutations);
        for _ in 0..count {
            let at = self.rng.gen_range(0..buf.len());
            buf[at] = self.rng.r#gen();
        }
        count
    }
}
