//! Console flow that produces the preferences a session starts from.

use std::io::{BufRead, Write};

use log::warn;

use crate::{
    console::{Console, ConsoleError},
    preferences::{GamePreferences, PreferencesError, PreferencesStore},
};

/// Chest chance bounds applied to preferences entered at the console.
pub const DEFAULT_MIN_CHANCES: i32 = 25;
pub const DEFAULT_MAX_CHANCES: i32 = 75;

/// Asks whether to load saved preferences, falling back to entering new ones when loading fails.
pub fn acquire_preferences<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &PreferencesStore,
) -> Result<GamePreferences, ConsoleError> {
    if console.prompt_yes_no("Load existing preferences?")? {
        let name = console.prompt("file name: ")?;
        match load_valid(store, &name) {
            Ok(preferences) => return Ok(preferences),
            Err(err) => {
                warn!("loading preferences '{name}' failed: {err}");
                console.say(&format!("Preferences load failed: {err}"))?;
                console.say("Let's set up new preferences instead.")?;
            }
        }
    }
    new_preferences(console, store)
}

fn load_valid(store: &PreferencesStore, name: &str) -> Result<GamePreferences, PreferencesError> {
    let preferences = store.load(name)?;
    preferences.validate()?;
    Ok(preferences)
}

/// Prompts for every preference, re-asking until they describe a playable map, then offers to
/// save them.
pub fn new_preferences<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &PreferencesStore,
) -> Result<GamePreferences, ConsoleError> {
    let preferences = loop {
        let preferences = prompt_preferences(console)?;
        match preferences.validate() {
            Ok(()) => break preferences,
            Err(err) => console.say(&format!("{err}. Please try again."))?,
        }
    };

    if console.prompt_yes_no("Would you like to save these preferences?")? {
        let name = console.prompt("file name: ")?;
        match store.save(&name, &preferences) {
            Ok(path) => console.say(&format!("Saved to {}", path.display()))?,
            Err(err) => {
                warn!("saving preferences '{name}' failed: {err}");
                console.say(&format!("Could not save preferences: {err}"))?;
            }
        }
    }

    Ok(preferences)
}

fn prompt_preferences<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<GamePreferences, ConsoleError> {
    let width = console.prompt_parse("map width: ")?;
    let height = console.prompt_parse("map height: ")?;
    let min_damage = console.prompt_parse("minimum enemy damage: ")?;
    let max_damage = console.prompt_parse("maximum enemy damage: ")?;
    let min_speed = console.prompt_parse("minimum enemy speed: ")?;
    let max_speed = console.prompt_parse("maximum enemy speed: ")?;
    let enemies = console.prompt_parse("enemies: ")?;
    let chests = console.prompt_parse("chests: ")?;

    Ok(GamePreferences::new(
        width, height, min_damage, max_damage, min_speed, max_speed, enemies, chests,
    )
    .with_chest_chances(DEFAULT_MIN_CHANCES, DEFAULT_MAX_CHANCES))
}
