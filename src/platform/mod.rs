//! Platform abstraction layer
//!
//! Handles native/browser differences for:
//! - Game clock (monotonic milliseconds)
//! - Save locations on disk

use std::cell::Cell;
use std::path::PathBuf;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "HOLE_DODGE_DATA_DIR";

const APP_DIR: &str = "hole-dodge";
const ACHIEVEMENTS_FILE: &str = "achievements.json";
const SETTINGS_FILE: &str = "settings.json";

/// Monotonic millisecond counter, independent of wall-clock time
pub trait GameClock {
    fn now_ms(&self) -> u64;
}

/// Milliseconds since the clock was created
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl GameClock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// `performance.now()` based clock (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

#[cfg(target_arch = "wasm32")]
impl MonotonicClock {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_arch = "wasm32")]
impl GameClock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now() as u64)
            .unwrap_or(0)
    }
}

/// Hand-driven clock for headless runs and tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl GameClock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Directory for save data.
///
/// `HOLE_DODGE_DATA_DIR` wins; otherwise `%APPDATA%` on Windows, then the XDG
/// config dir, then `~/.config`, then the working directory.
pub fn data_dir() -> PathBuf {
    if let Some(dir) = non_empty_var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    if cfg!(windows) {
        if let Some(appdata) = non_empty_var("APPDATA") {
            return PathBuf::from(appdata).join(APP_DIR);
        }
    }
    let base = non_empty_var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| non_empty_var("HOME").map(|home| PathBuf::from(home).join(".config")));
    match base {
        Some(base) => base.join(APP_DIR),
        None => PathBuf::from("."),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

pub fn achievements_path() -> PathBuf {
    data_dir().join(ACHIEVEMENTS_FILE)
}

pub fn settings_path() -> PathBuf {
    data_dir().join(SETTINGS_FILE)
}
