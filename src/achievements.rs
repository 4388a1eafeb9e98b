//! First-clear achievements
//!
//! One achievement per difficulty, unlocked by the first win at that
//! difficulty. Either win (absorption or survival) counts. Every unlock is
//! written through to the store immediately.

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::persistence::{
    AchievementStore, SavedAchievement, SavedAchievements, load_or_default, save_logged,
};
use crate::sim::RoundOutcome;

/// The fixed achievement set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementKey {
    FirstEasy,
    FirstNormal,
    FirstHell,
}

impl AchievementKey {
    pub const ALL: [AchievementKey; 3] = [
        AchievementKey::FirstEasy,
        AchievementKey::FirstNormal,
        AchievementKey::FirstHell,
    ];

    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => AchievementKey::FirstEasy,
            Difficulty::Normal => AchievementKey::FirstNormal,
            Difficulty::Hell => AchievementKey::FirstHell,
        }
    }

    /// Storage key
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementKey::FirstEasy => "first_easy",
            AchievementKey::FirstNormal => "first_normal",
            AchievementKey::FirstHell => "first_hell",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    pub fn name(&self) -> &'static str {
        match self {
            AchievementKey::FirstEasy => "Getting Started",
            AchievementKey::FirstNormal => "Making Progress",
            AchievementKey::FirstHell => "Mastery",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AchievementKey::FirstEasy => "Clear Easy for the first time",
            AchievementKey::FirstNormal => "Clear Normal for the first time",
            AchievementKey::FirstHell => "Clear Hell for the first time",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AchievementKey::FirstEasy => "🥉",
            AchievementKey::FirstNormal => "🥈",
            AchievementKey::FirstHell => "🥇",
        }
    }
}

/// One achievement and its unlock state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub key: AchievementKey,
    pub unlocked: bool,
    /// Game-clock ms at unlock
    pub unlock_time: Option<u64>,
}

impl Achievement {
    fn locked(key: AchievementKey) -> Self {
        Self {
            key,
            unlocked: false,
            unlock_time: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.key.name()
    }

    /// Icon for the achievement list; locked entries stay a mystery
    pub fn display_icon(&self) -> &'static str {
        if self.unlocked { self.key.icon() } else { "?" }
    }

    /// Description for the achievement list
    pub fn display_description(&self) -> &'static str {
        if self.unlocked {
            self.key.description()
        } else {
            "???"
        }
    }
}

/// Payload shown when an achievement unlocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnlockEvent {
    pub key: AchievementKey,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub message: String,
}

/// Unlock bookkeeping over a durable store
#[derive(Debug)]
pub struct AchievementTracker<S: AchievementStore> {
    entries: Vec<Achievement>,
    store: S,
}

impl<S: AchievementStore> AchievementTracker<S> {
    /// Start with everything locked, then apply whatever the store holds.
    /// Unknown keys in the store are ignored.
    pub fn load(store: S) -> Self {
        let saved = load_or_default(&store);
        let entries = AchievementKey::ALL
            .into_iter()
            .map(|key| match saved.get(key.as_str()) {
                Some(entry) => Achievement {
                    key,
                    unlocked: entry.unlocked,
                    unlock_time: entry.unlock_time,
                },
                None => Achievement::locked(key),
            })
            .collect();

        let tracker = Self { entries, store };
        log::info!(
            "Achievements: {}/{} unlocked",
            tracker.unlocked_count(),
            tracker.total_count()
        );
        tracker
    }

    /// Check a finished round for a first-clear unlock
    pub fn on_round_completed(
        &mut self,
        difficulty: Difficulty,
        outcome: RoundOutcome,
        now_ms: u64,
    ) -> Option<UnlockEvent> {
        if !outcome.is_win() {
            return None;
        }
        let key = AchievementKey::for_difficulty(difficulty);
        self.unlock(key, format!("First clear on {difficulty}!"), now_ms)
    }

    /// Unlock one achievement and persist. `None` if it was already unlocked.
    pub fn unlock(
        &mut self,
        key: AchievementKey,
        message: String,
        now_ms: u64,
    ) -> Option<UnlockEvent> {
        let entry = self.entries.iter_mut().find(|a| a.key == key)?;
        if entry.unlocked {
            return None;
        }
        entry.unlocked = true;
        entry.unlock_time = Some(now_ms);
        log::info!("Achievement unlocked: {} - {}", key.name(), key.description());

        let saved = self.to_saved();
        save_logged(&mut self.store, &saved);

        Some(UnlockEvent {
            key,
            name: key.name(),
            description: key.description(),
            icon: key.icon(),
            message,
        })
    }

    /// All achievements, locked ones included, in fixed order
    pub fn achievements(&self) -> &[Achievement] {
        &self.entries
    }

    pub fn get(&self, key: AchievementKey) -> Option<&Achievement> {
        self.entries.iter().find(|a| a.key == key)
    }

    pub fn is_unlocked(&self, key: AchievementKey) -> bool {
        self.get(key).is_some_and(|a| a.unlocked)
    }

    pub fn unlocked_count(&self) -> usize {
        self.entries.iter().filter(|a| a.unlocked).count()
    }

    pub fn total_count(&self) -> usize {
        self.entries.len()
    }

    pub fn list_unlocked(&self) -> Vec<Achievement> {
        self.entries.iter().filter(|a| a.unlocked).copied().collect()
    }

    /// Up to `count` unlocked achievements, newest first; missing timestamps last
    pub fn most_recent_unlocked(&self, count: usize) -> Vec<Achievement> {
        let mut unlocked = self.list_unlocked();
        unlocked.sort_by(|a, b| match (a.unlock_time, b.unlock_time) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        unlocked.truncate(count);
        unlocked
    }

    /// Persisted form: unlock flag and time for every key
    pub fn to_saved(&self) -> SavedAchievements {
        self.entries
            .iter()
            .map(|a| {
                (
                    a.key.as_str().to_string(),
                    SavedAchievement {
                        unlocked: a.unlocked,
                        unlock_time: a.unlock_time,
                    },
                )
            })
            .collect()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
