use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro64StarStar;

/// A small deterministic rng for reproducible games and tests.
pub fn consistent_rng(seed: u64) -> impl Rng {
    Xoroshiro64StarStar::seed_from_u64(seed)
}
