use std::{
    io::{BufRead, Write},
    time::Duration,
};

use log::{debug, info};
use rand::Rng;

use crate::{
    EntityId,
    animation::{Delay, play_escape, play_walk},
    chest::LootRoll,
    command::Command,
    console::{Console, ConsoleError, INVALID_INPUT},
    entity::{Entity, EntityKind},
    loot::{Item, LootTable, default_loot_table},
    map::{Map, MapError},
    player::{Direction, MoveOutcome, Player},
    preferences::{GamePreferences, PreferencesError},
};

const DIRECTION_MENU: &str = "   1. Up\n   2. Right\n   3. Down\n   4. Left";
const ENCOUNTER_MENU: &str = "What do you do?\n1. Attempt Flee\n2. Begin Combat";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Console(#[from] ConsoleError),
    #[error(transparent)]
    Map(#[from] MapError),
    #[error(transparent)]
    Preferences(#[from] PreferencesError),
}

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        SessionError::Console(ConsoleError::Io(err))
    }
}

/// Tunables for a play session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub player_health: i32,
    pub player_speed: i32,
    /// Walking frames played per move.
    pub steps: usize,
    pub step_delay: Duration,
    pub escape_dots: usize,
    pub escape_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            player_health: 50,
            player_speed: 2,
            steps: 3,
            step_delay: Duration::from_millis(300),
            escape_dots: 3,
            escape_delay: Duration::from_millis(600),
        }
    }
}

/// Whether the main loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterOutcome {
    /// The foe was slower; it is gone from the map.
    Escaped,
    /// The foe was too fast to outrun.
    Caught,
    /// Combat was chosen. Nothing happens yet.
    Fought,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LootOutcome {
    Looted(Vec<Item>),
    Mimic(EncounterOutcome),
    /// The roll failed and there was no mimic inside.
    Stuck,
}

/// A single game: the map, the player on it, and the sources of chance and time.
pub struct Session<G, D> {
    map: Map,
    rng: G,
    delay: D,
    loot_table: LootTable,
    config: SessionConfig,
}

impl<G: Rng, D: Delay> Session<G, D> {
    /// Populates a fresh map from `preferences` and spawns the player on it.
    pub fn new(
        preferences: GamePreferences,
        config: SessionConfig,
        mut rng: G,
        delay: D,
    ) -> Result<Self, SessionError> {
        preferences.validate()?;
        let mut map = Map::new(preferences);
        map.populate(&mut rng)?;
        let player = Player::new(config.player_health, config.player_speed);
        map.spawn(EntityKind::Player(player), &mut rng)?;
        info!(
            "session started on a {}x{} map with {} occupants",
            map.width(),
            map.height(),
            map.occupants().len()
        );
        Ok(Self::from_map(map, config, rng, delay))
    }

    /// Wraps an already prepared map.
    pub fn from_map(map: Map, config: SessionConfig, rng: G, delay: D) -> Self {
        Session {
            map,
            rng,
            delay,
            loot_table: default_loot_table(),
            config,
        }
    }

    pub fn with_loot_table(mut self, loot_table: LootTable) -> Self {
        self.loot_table = loot_table;
        self
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Renders the map, then reads and executes commands until `quit` or end of input.
    ///
    /// Unknown commands are ignored.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Result<(), SessionError> {
        console.print(&self.map.render())?;
        loop {
            let line = match console.prompt(">") {
                Ok(line) => line,
                Err(ConsoleError::Closed) => break,
                Err(err) => return Err(err.into()),
            };
            let Some(command) = Command::parse(&line) else {
                debug!("ignoring unknown command {line:?}");
                continue;
            };
            match self.execute(command, console) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(SessionError::Console(ConsoleError::Closed)) => break,
                Err(err) => return Err(err),
            }
        }
        info!("session ended");
        Ok(())
    }

    pub fn execute<R: BufRead, W: Write>(
        &mut self,
        command: Command,
        console: &mut Console<R, W>,
    ) -> Result<Flow, SessionError> {
        match command {
            Command::Move => {
                console.say(DIRECTION_MENU)?;
                let direction = prompt_direction(console)?;
                self.start_move(direction, console)?;
            }
            Command::Loot => {
                self.loot_underfoot(console)?;
            }
            Command::Inventory => self.show_inventory(console)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Plays the walking animation, takes the step, resolves any encounter and redraws the map.
    ///
    /// A step off the map is refused before anything is animated.
    pub fn start_move<R: BufRead, W: Write>(
        &mut self,
        direction: Direction,
        console: &mut Console<R, W>,
    ) -> Result<MoveOutcome, SessionError> {
        if self.map.step_target(direction)?.is_none() {
            console.say("You can't go that way.")?;
            console.print(&self.map.render())?;
            return Ok(MoveOutcome::Blocked);
        }

        play_walk(
            console.output(),
            &mut self.delay,
            self.config.steps,
            self.config.step_delay,
        )?;
        let outcome = self.map.move_player(direction)?;

        if let MoveOutcome::Moved(position) = outcome {
            console.say(&format!("{}, {}", position.x, position.y))?;
            if let Some(enemy) = self.map.encounter().map(|e| e.id) {
                self.encounter_message(enemy, console)?;
            } else if self.map.chest_underfoot().is_some() {
                console.say("You found a chest! Type 'loot' to open it.")?;
            }
        }

        console.print(&self.map.render())?;
        Ok(outcome)
    }

    /// Offers the flee-or-fight choice against `foe_id`, re-asking on invalid replies.
    pub fn encounter_message<R: BufRead, W: Write>(
        &mut self,
        foe_id: EntityId,
        console: &mut Console<R, W>,
    ) -> Result<EncounterOutcome, SessionError> {
        let name = self
            .map
            .get(foe_id)
            .ok_or(MapError::UnknownEntity(foe_id))?
            .foe()
            .ok_or(MapError::NotAFoe(foe_id))?
            .name
            .clone();
        console.say(&format!("\nYou've Encountered {name}!\n"))?;

        loop {
            console.say(ENCOUNTER_MENU)?;
            match console.prompt(">")?.as_str() {
                "1" => {
                    return if self.map.attempt_flee(foe_id)? {
                        play_escape(
                            console.output(),
                            &mut self.delay,
                            self.config.escape_dots,
                            self.config.escape_delay,
                        )?;
                        Ok(EncounterOutcome::Escaped)
                    } else {
                        console.say(&format!("{name} is too fast to escape!"))?;
                        Ok(EncounterOutcome::Caught)
                    };
                }
                "2" => return Ok(EncounterOutcome::Fought),
                _ => console.say("Invalid Response...")?,
            }
        }
    }

    /// Loots the chest the player stands on, if there is one.
    pub fn loot_underfoot<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Result<Option<LootOutcome>, SessionError> {
        let Some(chest) = self.map.chest_underfoot().map(|e| e.id) else {
            console.say("There is nothing to loot here.")?;
            return Ok(None);
        };
        let outcome = self.loot(chest, console)?;
        console.print(&self.map.render())?;
        Ok(Some(outcome))
    }

    /// Opens `chest_id`.
    ///
    /// A roll above the chest's chances hands out one item from the loot table and empties the
    /// chest off the map. Otherwise its mimic, if any, attacks.
    pub fn loot<R: BufRead, W: Write>(
        &mut self,
        chest_id: EntityId,
        console: &mut Console<R, W>,
    ) -> Result<LootOutcome, SessionError> {
        let chest = self
            .map
            .get(chest_id)
            .ok_or(MapError::UnknownEntity(chest_id))?
            .as_chest()
            .ok_or(MapError::NotAChest(chest_id))?;
        let roll = chest.roll_loot(&mut self.rng);
        let has_mimic = chest.mimic().is_some();

        match roll {
            LootRoll::Looted => {
                console.say("Looting...")?;
                let items = self.loot_table.choose_items(1, &mut self.rng);
                for item in &items {
                    console.say(&format!("You found {}: {}", item.name, item.description))?;
                }
                self.map
                    .player_stats_mut()?
                    .inventory
                    .extend(items.iter().cloned());
                self.map.remove(chest_id);
                Ok(LootOutcome::Looted(items))
            }
            LootRoll::Sprung if has_mimic => {
                console.say("The chest was a mimic!")?;
                Ok(LootOutcome::Mimic(self.encounter_message(chest_id, console)?))
            }
            LootRoll::Sprung => {
                console.say("The chest won't open.")?;
                Ok(LootOutcome::Stuck)
            }
        }
    }

    pub fn show_inventory<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<(), SessionError> {
        let player = self.map.player_stats()?;
        if player.inventory.is_empty() {
            console.say("Your inventory is empty.")?;
            return Ok(());
        }
        let listing: Vec<String> = player
            .inventory
            .iter()
            .map(|item| format!(" - {}: {}", item.name, item.description))
            .collect();
        console.say(&format!("Inventory ({}):", listing.len()))?;
        console.say(&listing.join("\n"))?;
        Ok(())
    }

    pub fn player(&self) -> Result<&Entity, SessionError> {
        Ok(self.map.player()?)
    }
}

/// Asks for a direction number until one of 1-4 is given.
fn prompt_direction<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<Direction, ConsoleError> {
    loop {
        let number: u32 = console.prompt_parse(">")?;
        match Direction::from_number(number) {
            Some(direction) => return Ok(direction),
            None => console.say(INVALID_INPUT)?,
        }
    }
}
