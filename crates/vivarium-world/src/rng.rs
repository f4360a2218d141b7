//! Deterministic random selection.
//!
//! The engine needs exactly one kind of randomness: a uniform draw used to
//! spawn the initial population and to pick one cell from a list of equally
//! eligible candidates. `Selector` wraps a seeded ChaCha8 stream so a given
//! seed always replays the same sequence of draws.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded source of uniform draws with an explicit replay contract
#[derive(Debug, Clone)]
pub struct Selector {
    seed: u64,
    rng: ChaCha8Rng,
}

impl Selector {
    /// Create a selector whose whole future sequence is fixed by `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Rewind the stream to the state `new` produced.
    ///
    /// The world resets its selector immediately before and after initial
    /// population, so the first gameplay draw never depends on how many
    /// cells the population pass consumed.
    pub fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }

    /// Uniform draw in `[0, bound)`.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is zero.
    pub fn next(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }

    /// Pick one element of `candidates`, uniformly.
    ///
    /// # Panics
    ///
    /// Panics if `candidates` is empty. Callers check for candidates before
    /// consuming a draw.
    pub fn pick<'a, T>(&mut self, candidates: &'a [T]) -> &'a T {
        &candidates[self.next(candidates.len())]
    }
}
