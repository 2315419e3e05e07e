use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Largest map, in cells, that a session will render.
pub const MAX_MAP_CELLS: usize = 1_000_000;

/// Errors raised while validating, saving or loading preferences.
#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("preferences io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("preferences are not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid preferences: {0}")]
    Invalid(String),
    #[error("invalid preferences file name '{0}'")]
    InvalidName(String),
}

/// Configuration governing map size and enemy/chest generation.
///
/// Ranges are half-open: values are drawn from `[min, max)`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePreferences {
    pub width: usize,
    pub height: usize,
    pub num_of_enemies: usize,
    pub min_damage: i32,
    pub max_damage: i32,
    pub min_enemy_speed: i32,
    pub max_enemy_speed: i32,
    pub number_of_chests: usize,
    #[serde(default)]
    pub min_chances: i32,
    #[serde(default)]
    pub max_chances: i32,
}

impl GamePreferences {
    /// Builds preferences from the values gathered at the console.
    ///
    /// Chest chance bounds are left at zero; use [`GamePreferences::with_chest_chances`] to set
    /// them.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        width: usize,
        height: usize,
        min_damage: i32,
        max_damage: i32,
        min_enemy_speed: i32,
        max_enemy_speed: i32,
        num_of_enemies: usize,
        number_of_chests: usize,
    ) -> Self {
        GamePreferences {
            width,
            height,
            num_of_enemies,
            min_damage,
            max_damage,
            min_enemy_speed,
            max_enemy_speed,
            number_of_chests,
            min_chances: 0,
            max_chances: 0,
        }
    }

    pub fn with_chest_chances(mut self, min_chances: i32, max_chances: i32) -> Self {
        self.min_chances = min_chances;
        self.max_chances = max_chances;
        self
    }

    /// Number of cells on the map.
    pub fn area(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Checks that a map built from these preferences can hold every occupant plus the player
    /// and stays within [`MAX_MAP_CELLS`].
    pub fn validate(&self) -> Result<(), PreferencesError> {
        if self.width == 0 || self.height == 0 {
            return Err(PreferencesError::Invalid(format!(
                "map must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        match self.width.checked_mul(self.height) {
            Some(cells) if cells <= MAX_MAP_CELLS => {}
            _ => {
                return Err(PreferencesError::Invalid(format!(
                    "a {}x{} map exceeds the limit of {MAX_MAP_CELLS} cells",
                    self.width, self.height
                )));
            }
        }
        let occupants = self
            .num_of_enemies
            .saturating_add(self.number_of_chests)
            .saturating_add(1);
        if occupants > self.area() {
            return Err(PreferencesError::Invalid(format!(
                "{} enemies, {} chests and the player do not fit on a {}x{} map",
                self.num_of_enemies, self.number_of_chests, self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, PreferencesError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PreferencesError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Saves and loads named preference files inside a single directory.
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    dir: PathBuf,
}

impl PreferencesStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        PreferencesStore { dir: dir.into() }
    }

    /// Opens the store, creating its directory if missing.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PreferencesError> {
        let store = Self::new(dir);
        fs::create_dir_all(&store.dir)?;
        debug!("preferences directory ready at {}", store.dir.display());
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `name`, e.g. `preferences/easy.json`.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, PreferencesError> {
        let name = name.trim();
        let is_plain = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\'])
            && !name.contains('\0');
        if !is_plain {
            return Err(PreferencesError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(format!("{name}.json")))
    }

    pub fn save(
        &self,
        name: &str,
        preferences: &GamePreferences,
    ) -> Result<PathBuf, PreferencesError> {
        let path = self.path_for(name)?;
        fs::write(&path, preferences.to_json()?)?;
        info!("saved preferences to {}", path.display());
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<GamePreferences, PreferencesError> {
        let path = self.path_for(name)?;
        let json = fs::read_to_string(&path)?;
        let preferences = GamePreferences::from_json(&json)?;
        info!("loaded preferences from {}", path.display());
        Ok(preferences)
    }
}
