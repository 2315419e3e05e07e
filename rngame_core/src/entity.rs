use serde::{Deserialize, Serialize};

use crate::{EntityId, Position, chest::Chest, enemy::Enemy, player::Player};

/// Display-kind tag shared by every occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Player,
    Enemy,
    Chest,
}

impl Kind {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Player => "Player",
            Kind::Enemy => "Enemy",
            Kind::Chest => "Chest",
        }
    }

    /// Two-character map glyph. Enemies stay hidden until encountered.
    pub fn glyph(&self) -> &'static str {
        match self {
            Kind::Player => " O",
            Kind::Enemy => "  ",
            Kind::Chest => " x",
        }
    }
}

/// Kind-specific state of an occupant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player(Player),
    Enemy(Enemy),
    Chest(Chest),
}

impl EntityKind {
    pub fn kind(&self) -> Kind {
        match self {
            EntityKind::Player(_) => Kind::Player,
            EntityKind::Enemy(_) => Kind::Enemy,
            EntityKind::Chest(_) => Kind::Chest,
        }
    }
}

/// Anything placed on the map grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub position: Position,
    pub kind: EntityKind,
}

impl Entity {
    pub fn kind(&self) -> Kind {
        self.kind.kind()
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Exact-coordinate collision, not proximity.
    pub fn collides_with(&self, other: &Entity) -> bool {
        self.position == other.position
    }

    pub fn as_player(&self) -> Option<&Player> {
        match &self.kind {
            EntityKind::Player(player) => Some(player),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut Player> {
        match &mut self.kind {
            EntityKind::Player(player) => Some(player),
            _ => None,
        }
    }

    pub fn as_enemy(&self) -> Option<&Enemy> {
        match &self.kind {
            EntityKind::Enemy(enemy) => Some(enemy),
            _ => None,
        }
    }

    pub fn as_chest(&self) -> Option<&Chest> {
        match &self.kind {
            EntityKind::Chest(chest) => Some(chest),
            _ => None,
        }
    }

    /// The creature a player faces when encountering this entity: the enemy itself, or a
    /// chest's mimic.
    pub fn foe(&self) -> Option<&Enemy> {
        match &self.kind {
            EntityKind::Enemy(enemy) => Some(enemy),
            EntityKind::Chest(chest) => chest.mimic(),
            EntityKind::Player(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: EntityId, x: usize, y: usize, kind: EntityKind) -> Entity {
        Entity {
            id,
            position: Position::new(x, y),
            kind,
        }
    }

    #[test]
    fn collision_is_exact_coordinate_equality() {
        let a = entity(0, 2, 3, EntityKind::Chest(Chest::new(10)));
        let b = entity(1, 2, 3, EntityKind::Enemy(Enemy::new("Kaly", 1, 1)));
        let c = entity(2, 2, 4, EntityKind::Chest(Chest::new(10)));
        assert!(a.collides_with(&b));
        assert!(!a.collides_with(&c));
    }

    #[test]
    fn kinds_have_names_and_glyphs() {
        assert_eq!(Kind::Player.glyph(), " O");
        assert_eq!(Kind::Chest.glyph(), " x");
        assert_eq!(Kind::Enemy.glyph(), "  ");
        assert_eq!(Kind::Enemy.name(), "Enemy");
    }

    #[test]
    fn foe_resolves_enemies_and_mimics() {
        let enemy = entity(0, 0, 0, EntityKind::Enemy(Enemy::new("Ruvo", 2, 3)));
        assert_eq!(enemy.foe().map(|e| e.speed), Some(3));

        let plain = entity(1, 0, 0, EntityKind::Chest(Chest::new(40)));
        assert!(plain.foe().is_none());

        let trapped = entity(
            2,
            0,
            0,
            EntityKind::Chest(Chest::new(40).with_mimic(Enemy::new("Mimo", 4, 6))),
        );
        assert_eq!(trapped.foe().map(|e| e.name.as_str()), Some("Mimo"));

        let player = entity(3, 0, 0, EntityKind::Player(Player::new(50, 2)));
        assert!(player.foe().is_none());
    }
}
