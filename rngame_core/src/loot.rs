use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub description: String,
}

impl Item {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Item {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// An item and its weight within a [`LootTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootMember {
    pub item: Item,
    pub chance: u32,
}

impl LootMember {
    pub fn new(item: Item, chance: u32) -> Self {
        LootMember { item, chance }
    }
}

/// Weighted catalog of rewards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LootTable {
    members: Vec<LootMember>,
}

impl LootTable {
    pub fn new(members: Vec<LootMember>) -> Self {
        LootTable { members }
    }

    pub fn members(&self) -> &[LootMember] {
        &self.members
    }

    /// Draws `number` items with replacement.
    ///
    /// Each member is entered into the pool `chance` times, so its odds are proportional to
    /// its weight. An empty pool yields no items.
    pub fn choose_items<R: Rng>(&self, number: usize, rng: &mut R) -> Vec<Item> {
        let pool: Vec<&Item> = self
            .members
            .iter()
            .flat_map(|member| std::iter::repeat_n(&member.item, member.chance as usize))
            .collect();
        if pool.is_empty() {
            return Vec::new();
        }
        (0..number)
            .map(|_| pool[rng.random_range(0..pool.len())].clone())
            .collect()
    }
}

/// The rewards chests hand out during a session.
pub fn default_loot_table() -> LootTable {
    LootTable::new(vec![
        LootMember::new(Item::new("Copper Coin", "A dull, well-worn coin."), 10),
        LootMember::new(Item::new("Bandage", "Stops the bleeding, mostly."), 6),
        LootMember::new(Item::new("Rusty Dagger", "Better than bare hands."), 3),
        LootMember::new(Item::new("Silver Ring", "Cold to the touch."), 1),
    ])
}
