//! Achievement persistence
//!
//! Features:
//! - JSON document mapping achievement key to `{unlocked, unlock_time}`
//! - File store (native), LocalStorage store (wasm32), in-memory store (tests/headless)
//! - Gateway helpers that log and swallow every storage failure
//!
//! Display fields (name, description, icon) are static and never stored.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Stored state of one achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedAchievement {
    pub unlocked: bool,
    pub unlock_time: Option<u64>,
}

/// Stored achievements keyed by achievement key (`first_easy`, ...)
pub type SavedAchievements = BTreeMap<String, SavedAchievement>;

/// A durable home for achievement state
pub trait AchievementStore {
    /// Read stored state. An absent store reads as empty, not as an error.
    fn load(&self) -> Result<SavedAchievements>;

    /// Replace stored state
    fn save(&mut self, data: &SavedAchievements) -> Result<()>;
}

fn decode(json: &str) -> Result<SavedAchievements> {
    serde_json::from_str(json).map_err(|e| GameError::PersistenceRead(e.to_string()))
}

fn encode(data: &SavedAchievements) -> Result<String> {
    serde_json::to_string_pretty(data).map_err(|e| GameError::PersistenceWrite(e.to_string()))
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AchievementStore for FileStore {
    fn load(&self) -> Result<SavedAchievements> {
        if !self.path.exists() {
            log::info!("No achievements at {}, starting fresh", self.path.display());
            return Ok(SavedAchievements::new());
        }
        let json = fs::read_to_string(&self.path).map_err(|e| {
            GameError::PersistenceRead(format!("{}: {e}", self.path.display()))
        })?;
        let data = decode(&json)?;
        log::info!("Loaded achievements from {}", self.path.display());
        Ok(data)
    }

    fn save(&mut self, data: &SavedAchievements) -> Result<()> {
        let json = encode(data)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                GameError::PersistenceWrite(format!("{}: {e}", parent.display()))
            })?;
        }
        fs::write(&self.path, json).map_err(|e| {
            GameError::PersistenceWrite(format!("{}: {e}", self.path.display()))
        })?;
        log::info!("Achievements saved to {}", self.path.display());
        Ok(())
    }
}

/// Process-local store; can be told to fail for exercising fallbacks
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    json: Option<String>,
    /// Successful saves so far
    pub writes: usize,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with a raw document
    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            json: Some(json.into()),
            ..Self::default()
        }
    }

    /// Raw stored document, if anything was saved
    pub fn json(&self) -> Option<&str> {
        self.json.as_deref()
    }
}

impl AchievementStore for MemoryStore {
    fn load(&self) -> Result<SavedAchievements> {
        if self.fail_reads {
            return Err(GameError::PersistenceRead("memory store read failure".into()));
        }
        match &self.json {
            Some(json) => decode(json),
            None => Ok(SavedAchievements::new()),
        }
    }

    fn save(&mut self, data: &SavedAchievements) -> Result<()> {
        if self.fail_writes {
            return Err(GameError::PersistenceWrite("memory store write failure".into()));
        }
        self.json = Some(encode(data)?);
        self.writes += 1;
        Ok(())
    }
}

/// Browser LocalStorage (WASM only); the store the wasm entry point uses
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub const DEFAULT_KEY: &'static str = "hole_dodge_achievements";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| GameError::PersistenceRead("LocalStorage unavailable".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl AchievementStore for LocalStorageStore {
    fn load(&self) -> Result<SavedAchievements> {
        let storage = Self::storage()?;
        match storage.get_item(&self.key) {
            Ok(Some(json)) => decode(&json),
            Ok(None) => Ok(SavedAchievements::new()),
            Err(_) => Err(GameError::PersistenceRead(format!("get_item({})", self.key))),
        }
    }

    fn save(&mut self, data: &SavedAchievements) -> Result<()> {
        let storage =
            Self::storage().map_err(|e| GameError::PersistenceWrite(e.to_string()))?;
        let json = encode(data)?;
        storage
            .set_item(&self.key, &json)
            .map_err(|_| GameError::PersistenceWrite(format!("set_item({})", self.key)))
    }
}

/// Load stored state, falling back to empty (everything locked) on any failure
pub fn load_or_default<S: AchievementStore + ?Sized>(store: &S) -> SavedAchievements {
    match store.load() {
        Ok(data) => data,
        Err(err) => {
            log::warn!("{err}; using default achievements");
            SavedAchievements::new()
        }
    }
}

/// Save state, logging failures. Returns whether the write succeeded.
pub fn save_logged<S: AchievementStore + ?Sized>(store: &mut S, data: &SavedAchievements) -> bool {
    match store.save(data) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("{err}; achievements kept in memory only");
            false
        }
    }
}
