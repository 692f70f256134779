//! Random number generation for dungeon layout
//!
//! Uses a seeded ChaCha RNG so the same seed always replays the same dungeon.
//! Every draw goes through a 32-bit range, which keeps the sequence identical
//! on 32- and 64-bit targets.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::dungeon::Direction;

/// Parity restriction for [`DungeonRng::rand_int`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    /// Only even values
    Even,
    /// Only odd values
    Odd,
}

impl Parity {
    /// Check if `value` has this parity
    pub const fn matches(self, value: i32) -> bool {
        match self {
            Parity::Even => value.rem_euclid(2) == 0,
            Parity::Odd => value.rem_euclid(2) == 1,
        }
    }
}

/// Dungeon random number generator
///
/// Wraps ChaCha8Rng for reproducible generation. Serializes as its bare seed,
/// so a deserialized RNG replays the sequence from the start.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub struct DungeonRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl From<u64> for DungeonRng {
    fn from(seed: u64) -> Self {
        Self::new(seed)
    }
}

impl From<DungeonRng> for u64 {
    fn from(rng: DungeonRng) -> Self {
        rng.seed
    }
}

impl DungeonRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Random integer in `min..=max`, optionally restricted to one parity.
    ///
    /// With a parity, `min` is moved up and `max` down to the requested
    /// parity as long as that keeps `min <= max`; the result is then uniform
    /// over the matching values in between. If the range is empty the result
    /// is `min`.
    pub fn rand_int(&mut self, min: i32, max: i32, parity: Option<Parity>) -> i32 {
        let Some(parity) = parity else {
            if min >= max {
                return min;
            }
            return self.rng.gen_range(min..=max);
        };

        let mut lo = min;
        let mut hi = max;
        if !parity.matches(lo) && lo < hi {
            lo += 1;
        }
        if !parity.matches(hi) && hi > lo {
            hi -= 1;
        }
        if lo >= hi {
            return lo;
        }

        let steps = (hi - lo) / 2;
        lo + self.rng.gen_range(0..=steps) * 2
    }

    /// Uniform pick among the four cardinal directions
    pub fn rand_direction(&mut self) -> Direction {
        Direction::ALL[self.rng.gen_range(0..Direction::ALL.len() as u32) as usize]
    }

    /// Choose a random element from a slice
    pub fn rand_pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let len = u32::try_from(items.len()).unwrap_or(u32::MAX);
        items.get(self.rng.gen_range(0..len) as usize)
    }
}

impl Default for DungeonRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
