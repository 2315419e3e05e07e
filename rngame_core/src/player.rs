use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    EntityId, Position,
    entity::{Entity, Kind},
    loot::Item,
    map::{Map, MapError},
};

/// Cardinal movement directions, numbered 1-4 at the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Maps the console menu number (1=Up, 2=Right, 3=Down, 4=Left).
    pub fn from_number(number: u32) -> Option<Direction> {
        match number {
            1 => Some(Direction::Up),
            2 => Some(Direction::Right),
            3 => Some(Direction::Down),
            4 => Some(Direction::Left),
            _ => None,
        }
    }

    /// `(dx, dy)` with y growing downwards.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

/// The player's stats and belongings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub health: i32,
    pub speed: i32,
    pub inventory: Vec<Item>,
}

impl Player {
    pub fn new(health: i32, speed: i32) -> Self {
        Player {
            health,
            speed,
            inventory: Vec::new(),
        }
    }
}

/// Result of asking the player to take one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved(Position),
    /// The step would leave the map; the player stays put.
    Blocked,
}

impl Map {
    pub fn player(&self) -> Result<&Entity, MapError> {
        self.player_id()
            .and_then(|id| self.get(id))
            .ok_or(MapError::NoPlayer)
    }

    pub fn player_stats(&self) -> Result<&Player, MapError> {
        self.player()?.as_player().ok_or(MapError::NoPlayer)
    }

    pub fn player_stats_mut(&mut self) -> Result<&mut Player, MapError> {
        let id = self.player_id().ok_or(MapError::NoPlayer)?;
        self.get_mut(id)
            .and_then(Entity::as_player_mut)
            .ok_or(MapError::NoPlayer)
    }

    /// Where one step in `direction` would take the player, or `None` if it leaves the map.
    pub fn step_target(&self, direction: Direction) -> Result<Option<Position>, MapError> {
        let current = self.player()?.position;
        let target = current.step(direction).filter(|p| self.in_bounds(*p));
        if target.is_none() {
            debug!("move {direction:?} from ({}, {}) blocked", current.x, current.y);
        }
        Ok(target)
    }

    /// Moves the player exactly one tile in `direction`.
    ///
    /// Steps that would leave `[0, width) x [0, height)` are rejected. Occupied tiles are not:
    /// walking onto an enemy is how encounters start.
    pub fn move_player(&mut self, direction: Direction) -> Result<MoveOutcome, MapError> {
        let Some(target) = self.step_target(direction)? else {
            return Ok(MoveOutcome::Blocked);
        };

        let id = self.player_id().ok_or(MapError::NoPlayer)?;
        let player = self.get_mut(id).ok_or(MapError::NoPlayer)?;
        player.position = target;
        Ok(MoveOutcome::Moved(target))
    }

    /// First occupant of `kind` sharing the player's tile, excluding the player.
    fn underfoot(&self, kind: Kind) -> Option<&Entity> {
        let player = self.player().ok()?;
        self.occupants()
            .iter()
            .find(|e| e.id != player.id && e.kind() == kind && e.collides_with(player))
    }

    /// The enemy the player has walked into, if any.
    pub fn encounter(&self) -> Option<&Entity> {
        self.underfoot(Kind::Enemy)
    }

    /// The chest the player is standing on, if any.
    pub fn chest_underfoot(&self) -> Option<&Entity> {
        self.underfoot(Kind::Chest)
    }

    /// Tries to escape from `foe_id`, an enemy or a chest with a mimic.
    ///
    /// Succeeds iff the foe is strictly slower than the player, in which case the foe is
    /// removed from the map.
    pub fn attempt_flee(&mut self, foe_id: EntityId) -> Result<bool, MapError> {
        let player_speed = self.player_stats()?.speed;
        let foe_speed = self
            .get(foe_id)
            .ok_or(MapError::UnknownEntity(foe_id))?
            .foe()
            .ok_or(MapError::NotAFoe(foe_id))?
            .speed;

        if foe_speed < player_speed {
            self.remove(foe_id);
            debug!("fled from #{foe_id} (speed {foe_speed} < {player_speed})");
            Ok(true)
        } else {
            debug!("failed to flee from #{foe_id} (speed {foe_speed} >= {player_speed})");
            Ok(false)
        }
    }
}
