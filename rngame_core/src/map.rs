use std::collections::HashSet;

use log::debug;
use rand::Rng;

use crate::{
    EntityId, Position, draw_in,
    chest::Chest,
    enemy::Enemy,
    entity::{Entity, EntityKind, Kind},
    grid::Grid,
    preferences::GamePreferences,
};

/// Represents errors that can occur while manipulating the map.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("entity {0} is not on the map")]
    UnknownEntity(EntityId),
    #[error("entity {0} is not something the player can flee from")]
    NotAFoe(EntityId),
    #[error("entity {0} is not a chest")]
    NotAChest(EntityId),
    #[error("no player has been spawned on the map")]
    NoPlayer,
    #[error("every cell of the {width}x{height} map is occupied")]
    MapFull { width: usize, height: usize },
}

/// The game board: its occupants and the preferences that shaped them.
///
/// Occupants are kept in insertion order. Lookups by coordinate return the first match, which
/// also decides what gets rendered when several occupants share a tile.
#[derive(Debug, Clone)]
pub struct Map {
    preferences: GamePreferences,
    occupants: Vec<Entity>,
    player: Option<EntityId>,
    next_entity_id: EntityId,
}

impl Map {
    /// Creates an empty map sized by `preferences`.
    pub fn new(preferences: GamePreferences) -> Self {
        Map {
            preferences,
            occupants: Vec::new(),
            player: None,
            next_entity_id: 0,
        }
    }

    pub fn preferences(&self) -> &GamePreferences {
        &self.preferences
    }

    pub fn width(&self) -> usize {
        self.preferences.width
    }

    pub fn height(&self) -> usize {
        self.preferences.height
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.x < self.width() && position.y < self.height()
    }

    pub fn occupants(&self) -> &[Entity] {
        &self.occupants
    }

    pub fn count(&self, kind: Kind) -> usize {
        self.occupants.iter().filter(|e| e.kind() == kind).count()
    }

    pub fn player_id(&self) -> Option<EntityId> {
        self.player
    }

    fn reserve_entity_id(&mut self) -> EntityId {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        id
    }

    /// Places an occupant at `position` without any collision check.
    ///
    /// Inserting a player makes it the map's player.
    pub fn insert(&mut self, kind: EntityKind, position: Position) -> EntityId {
        let id = self.reserve_entity_id();
        if matches!(kind, EntityKind::Player(_)) {
            self.player = Some(id);
        }
        self.occupants.push(Entity { id, position, kind });
        id
    }

    /// Places an occupant on a random unoccupied cell.
    ///
    /// Draws coordinates uniformly from `[0, width) x [0, height)` until one is free. Fails
    /// with [`MapError::MapFull`] instead of retrying forever when no cell is free.
    pub fn spawn<R: Rng>(
        &mut self,
        kind: EntityKind,
        rng: &mut R,
    ) -> Result<EntityId, MapError> {
        let occupied: HashSet<Position> = self
            .occupants
            .iter()
            .map(|e| e.position)
            .filter(|p| self.in_bounds(*p))
            .collect();
        if occupied.len() >= self.preferences.area() {
            return Err(MapError::MapFull {
                width: self.width(),
                height: self.height(),
            });
        }

        let mut attempts = 0usize;
        let position = loop {
            attempts += 1;
            let candidate = Position::new(
                rng.random_range(0..self.width()),
                rng.random_range(0..self.height()),
            );
            if !occupied.contains(&candidate) {
                break candidate;
            }
        };

        let kind_tag = kind.kind();
        let id = self.insert(kind, position);
        debug!(
            "spawned {} #{} at ({}, {}) after {} draw(s)",
            kind_tag.name(),
            id,
            position.x,
            position.y,
            attempts
        );
        Ok(id)
    }

    /// Spawns every enemy, then every chest, with stats drawn from the preferences.
    ///
    /// Each chest carries a mimic rolled from the enemy ranges.
    pub fn populate<R: Rng>(&mut self, rng: &mut R) -> Result<(), MapError> {
        let preferences = self.preferences.clone();
        for _ in 0..preferences.num_of_enemies {
            let enemy = Enemy::roll(&preferences, rng);
            self.spawn(EntityKind::Enemy(enemy), rng)?;
        }
        for _ in 0..preferences.number_of_chests {
            let chances = draw_in(rng, preferences.min_chances, preferences.max_chances);
            let mimic = Enemy::roll(&preferences, rng);
            self.spawn(EntityKind::Chest(Chest::new(chances).with_mimic(mimic)), rng)?;
        }
        debug!(
            "populated {}x{} map with {} enemies and {} chests",
            preferences.width,
            preferences.height,
            preferences.num_of_enemies,
            preferences.number_of_chests
        );
        Ok(())
    }

    /// First occupant at `position`, if any.
    pub fn entity_at(&self, position: Position) -> Option<&Entity> {
        self.occupants.iter().find(|e| e.position == position)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.occupants.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.occupants.iter_mut().find(|e| e.id == id)
    }

    /// Removes an occupant, preserving the order of the rest.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.occupants.iter().position(|e| e.id == id)?;
        let removed = self.occupants.remove(index);
        if self.player == Some(id) {
            self.player = None;
        }
        Some(removed)
    }

    /// Draws the map as ASCII: two characters per cell, `|` closing each row and an underscore
    /// border along the bottom.
    pub fn render(&self) -> String {
        let cells = Grid::from_generator(self.width(), self.height(), |x, y| {
            self.entity_at(Position::new(x, y)).map(Entity::kind)
        });

        let mut out = String::with_capacity((cells.width() * 2 + 2) * (cells.height() + 1));
        for row in cells.rows() {
            for cell in row {
                out.push_str(cell.map_or("  ", |kind| kind.glyph()));
            }
            out.push_str("|\n");
        }
        out.push_str(&"__".repeat(cells.width()));
        out.push_str("/\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;
    use rand::{SeedableRng, rngs::StdRng};

    fn preferences(width: usize, height: usize, enemies: usize, chests: usize) -> GamePreferences {
        GamePreferences::new(width, height, 1, 5, 1, 4, enemies, chests).with_chest_chances(20, 80)
    }

    fn assert_collision_free(map: &Map) {
        let positions: HashSet<Position> = map.occupants().iter().map(|e| e.position).collect();
        assert_eq!(positions.len(), map.occupants().len(), "two occupants share a tile");
    }

    #[test]
    fn spawns_never_collide() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut map = Map::new(preferences(6, 4, 0, 0));
            for _ in 0..24 {
                map.spawn(EntityKind::Chest(Chest::new(10)), &mut rng).unwrap();
                assert_collision_free(&map);
            }
            assert!(map.occupants().iter().all(|e| map.in_bounds(e.position)));
        }
    }

    #[test]
    fn spawn_on_full_map_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut map = Map::new(preferences(2, 1, 0, 0));
        map.spawn(EntityKind::Chest(Chest::new(0)), &mut rng).unwrap();
        map.spawn(EntityKind::Chest(Chest::new(0)), &mut rng).unwrap();
        assert_eq!(
            map.spawn(EntityKind::Chest(Chest::new(0)), &mut rng),
            Err(MapError::MapFull {
                width: 2,
                height: 1
            })
        );
        assert_eq!(map.occupants().len(), 2);
    }

    #[test]
    fn spawn_on_zero_sized_map_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut map = Map::new(preferences(0, 3, 0, 0));
        assert!(matches!(
            map.spawn(EntityKind::Chest(Chest::new(0)), &mut rng),
            Err(MapError::MapFull { .. })
        ));
    }

    #[test]
    fn spawn_ignores_duplicates_when_counting_free_cells() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut map = Map::new(preferences(2, 1, 0, 0));
        map.insert(EntityKind::Chest(Chest::new(0)), Position::new(0, 0));
        map.insert(EntityKind::Enemy(Enemy::new("Tosa", 1, 1)), Position::new(0, 0));
        let id = map.spawn(EntityKind::Chest(Chest::new(0)), &mut rng).unwrap();
        assert_eq!(map.get(id).unwrap().position, Position::new(1, 0));
    }

    #[test]
    fn populate_spawns_enemies_then_chests() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut map = Map::new(preferences(8, 8, 5, 3));
        map.populate(&mut rng).unwrap();

        let kinds: Vec<Kind> = map.occupants().iter().map(Entity::kind).collect();
        assert_eq!(kinds.len(), 8);
        assert!(kinds[..5].iter().all(|k| *k == Kind::Enemy));
        assert!(kinds[5..].iter().all(|k| *k == Kind::Chest));
        assert_collision_free(&map);
    }

    #[test]
    fn populated_stats_respect_ranges() {
        let prefs = GamePreferences::new(20, 20, 2, 6, 3, 9, 60, 60).with_chest_chances(-30, 140);
        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut map = Map::new(prefs.clone());
            map.populate(&mut rng).unwrap();
            for entity in map.occupants() {
                match &entity.kind {
                    EntityKind::Enemy(enemy) => {
                        assert!((2..6).contains(&enemy.damage));
                        assert!((3..9).contains(&enemy.speed));
                    }
                    EntityKind::Chest(chest) => {
                        assert!(chest.chances() <= 100);
                        let mimic = chest.mimic().expect("populated chests carry a mimic");
                        assert!((3..9).contains(&mimic.speed));
                    }
                    EntityKind::Player(_) => panic!("populate must not create players"),
                }
            }
        }
    }

    #[test]
    fn entity_at_returns_first_match() {
        let mut map = Map::new(preferences(3, 3, 0, 0));
        let first = map.insert(EntityKind::Chest(Chest::new(5)), Position::new(1, 1));
        map.insert(EntityKind::Player(Player::new(50, 2)), Position::new(1, 1));
        assert_eq!(map.entity_at(Position::new(1, 1)).map(|e| e.id), Some(first));
        assert!(map.entity_at(Position::new(0, 0)).is_none());
    }

    #[test]
    fn remove_keeps_order_and_clears_player() {
        let mut map = Map::new(preferences(3, 3, 0, 0));
        let a = map.insert(EntityKind::Chest(Chest::new(5)), Position::new(0, 0));
        let p = map.insert(EntityKind::Player(Player::new(50, 2)), Position::new(1, 0));
        let c = map.insert(EntityKind::Chest(Chest::new(5)), Position::new(2, 0));
        assert_eq!(map.player_id(), Some(p));

        assert!(map.remove(p).is_some());
        assert_eq!(map.player_id(), None);
        let ids: Vec<EntityId> = map.occupants().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a, c]);
        assert!(map.remove(p).is_none());
    }

    #[test]
    fn render_hides_enemies_and_draws_borders() {
        let mut map = Map::new(preferences(3, 2, 0, 0));
        map.insert(EntityKind::Chest(Chest::new(5)), Position::new(0, 0));
        map.insert(EntityKind::Enemy(Enemy::new("Hidu", 1, 1)), Position::new(1, 0));
        map.insert(EntityKind::Player(Player::new(50, 2)), Position::new(2, 1));

        assert_eq!(map.render(), " x    |\n     O|\n______/\n");
    }
}
