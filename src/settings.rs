//! Game settings and preferences
//!
//! Persisted separately from the leaderboard in its own storage slot.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StorageError};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === HUD ===
    /// Draw the top-10 panel
    pub show_leaderboard: bool,
    /// Show FPS counter
    pub show_fps: bool,

    // === Leaderboard ===
    /// Pre-fill the name prompt with the last name entered
    pub remember_name: bool,
    /// Last name entered at game over
    pub last_name: Option<String>,

    // === Debug ===
    /// Use this seed for every run instead of the clock
    pub fixed_seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_leaderboard: true,
            show_fps: false,
            remember_name: true,
            last_name: None,
            fixed_seed: None,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "skyline_dash_settings";

    /// Name to offer in the prompt, if remembering is enabled
    pub fn suggested_name(&self) -> Option<&str> {
        if self.remember_name {
            self.last_name.as_deref()
        } else {
            None
        }
    }

    /// Remember a name the player just entered
    pub fn note_name(&mut self, name: &str) {
        if self.remember_name {
            let name = name.trim();
            if !name.is_empty() {
                self.last_name = Some(name.to_string());
            }
        }
    }

    /// Seed for the next run: the fixed seed if set, else `fallback`
    pub fn run_seed(&self, fallback: u64) -> u64 {
        self.fixed_seed.unwrap_or(fallback)
    }

    /// Load settings from storage, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Discarding malformed settings: {e}"),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {e}"),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to storage
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
