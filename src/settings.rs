//! Game settings and preferences
//!
//! Persisted as JSON next to the achievements file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH, RESULT_DELAY_MS};
use crate::difficulty::Difficulty;
use crate::sim::Bounds;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty offered first
    pub default_difficulty: Difficulty,

    // === Window ===
    /// Initial window width (the live size arrives with every tick)
    pub window_width: f32,
    /// Initial window height
    pub window_height: f32,

    // === Flow ===
    /// How long the result screen shows before score and achievements apply
    pub result_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_difficulty: Difficulty::Easy,
            window_width: DEFAULT_WIDTH,
            window_height: DEFAULT_HEIGHT,
            result_delay_ms: RESULT_DELAY_MS,
        }
    }
}

impl Settings {
    pub fn window_bounds(&self) -> Bounds {
        Bounds::new(self.window_width, self.window_height)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("Using default settings");
                return Self::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Ignoring unreadable settings at {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Save settings; failures are logged
    pub fn save(&self, path: &Path) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Failed to encode settings: {err}");
                return;
            }
        };
        if let Some(parent) = path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                log::warn!("Failed to create {}: {err}", parent.display());
                return;
            }
        }
        match fs::write(path, json) {
            Ok(()) => log::info!("Settings saved"),
            Err(err) => log::warn!("Failed to save settings to {}: {err}", path.display()),
        }
    }
}
