use rand::Rng;
use serde::{Deserialize, Serialize};

pub mod animation;
pub mod chest;
pub mod command;
pub mod console;
pub mod enemy;
pub mod entity;
pub mod grid;
pub mod loot;
pub mod map;
pub mod names;
pub mod player;
pub mod preferences;
pub mod session;
pub mod setup;

pub use player::Direction;

/// Unique identifier for map occupants.
pub type EntityId = usize;

/// Represents a 2D coordinate on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Position) -> f64 {
        let dx = other.x as f64 - self.x as f64;
        let dy = other.y as f64 - self.y as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns the neighbouring position one tile in `direction`.
    ///
    /// Returns `None` when the step would underflow the origin.
    pub fn step(&self, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.delta();
        Some(Position {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

/// Draws from `[min, max)`, collapsing an empty range to `min`.
pub(crate) fn draw_in<R: Rng>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}
