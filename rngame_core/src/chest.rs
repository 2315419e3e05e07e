use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::enemy::Enemy;

/// A loot chest. `chances` is the percentage roll a looter must beat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chest {
    chances: u8,
    mimic: Option<Enemy>,
}

/// Outcome of opening a chest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LootRoll {
    Looted,
    Sprung,
}

impl Chest {
    /// Creates a chest, clamping `chances` into `[0, 100]`.
    pub fn new(chances: i32) -> Self {
        Chest {
            chances: chances.clamp(0, 100) as u8,
            mimic: None,
        }
    }

    pub fn with_mimic(mut self, mimic: Enemy) -> Self {
        self.mimic = Some(mimic);
        self
    }

    pub fn chances(&self) -> u8 {
        self.chances
    }

    pub fn mimic(&self) -> Option<&Enemy> {
        self.mimic.as_ref()
    }

    /// Draws from `[0, 100]`; anything above `chances` loots the chest.
    pub fn roll_loot<R: Rng>(&self, rng: &mut R) -> LootRoll {
        let roll: u8 = rng.random_range(0..=100);
        if roll > self.chances {
            LootRoll::Looted
        } else {
            LootRoll::Sprung
        }
    }
}
