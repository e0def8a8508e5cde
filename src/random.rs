//! Seeded random number generation.
//!
//! Every run owns exactly one generator, created here from an explicit
//! seed and passed down by `&mut` to initialization, selection, crossover
//! and mutation. ChaCha8 output is stable across platforms and `rand`
//! releases, so a seed reproduces a run bit for bit.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The concrete generator used by the GA runner.
pub type GaRng = ChaCha8Rng;

/// Creates a generator from a fixed seed.
pub fn create_rng(seed: u64) -> GaRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Resolves an optional seed, drawing a fresh one from the OS when absent.
///
/// The resolved value is returned so it can be logged and replayed.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}
