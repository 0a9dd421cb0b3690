//! Randomness source for spawn rolls
//!
//! The simulation only needs two primitives: a die roll and an inclusive
//! integer range. Keeping them behind a trait lets tests script outcomes.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

pub trait Dice {
    /// Uniform integer in `1..=sides`
    fn roll(&mut self, sides: u32) -> u32;
    /// Uniform integer in `lo..=hi`
    fn roll_range(&mut self, lo: i32, hi: i32) -> i32;
}

/// Seeded PCG generator
#[derive(Debug, Clone)]
pub struct GameRng {
    seed: u64,
    rng: Pcg32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed from the OS entropy source
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Dice for GameRng {
    fn roll(&mut self, sides: u32) -> u32 {
        self.rng.random_range(1..=sides.max(1))
    }

    fn roll_range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.random_range(lo..=hi)
    }
}
