use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{draw_in, names::random_name, preferences::GamePreferences};

/// Letters in a generated enemy name.
pub const ENEMY_NAME_LENGTH: usize = 6;

/// Health every rolled enemy starts with.
pub const ENEMY_HEALTH: i32 = 20;

/// A hostile creature hidden on the map (or inside a chest).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub damage: i32,
    pub speed: i32,
    pub health: i32,
}

impl Enemy {
    pub fn new(name: impl Into<String>, damage: i32, speed: i32) -> Self {
        Enemy {
            name: name.into(),
            damage,
            speed,
            health: ENEMY_HEALTH,
        }
    }

    /// Rolls damage and speed from the preference ranges and gives the enemy a random name.
    pub fn roll<R: Rng>(preferences: &GamePreferences, rng: &mut R) -> Self {
        let damage = draw_in(rng, preferences.min_damage, preferences.max_damage);
        let speed = draw_in(rng, preferences.min_enemy_speed, preferences.max_enemy_speed);
        let name = random_name(rng, ENEMY_NAME_LENGTH);
        Enemy::new(name, damage, speed)
    }
}
