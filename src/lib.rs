//! Hole Dodge - a single-screen avoidance game
//!
//! Core modules:
//! - `sim`: Round simulation (entities, placement, physics, win/lose)
//! - `economy`: Score economy and one-shot modifier items
//! - `achievements`: First-clear achievements
//! - `persistence`: Durable achievement storage
//! - `platform`: Game clock and storage locations
//! - `session`: Glue between rounds and the progression layer
//! - `settings`: Persisted configuration

pub mod achievements;
pub mod difficulty;
pub mod economy;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use achievements::{AchievementKey, AchievementTracker, UnlockEvent};
pub use difficulty::{Difficulty, DifficultyPreset};
pub use economy::{ActionReport, Economy, ItemKind, Modifiers};
pub use error::{GameError, Result};
pub use session::{RoundReport, Session};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Round time limit; surviving this long wins
    pub const TIME_LIMIT_MS: u64 = 10_000;
    /// Delay between a round ending and its result being applied
    pub const RESULT_DELAY_MS: u64 = 1_000;

    /// Default window size
    pub const DEFAULT_WIDTH: f32 = 960.0;
    pub const DEFAULT_HEIGHT: f32 = 540.0;

    /// Hazard opacity breathing
    pub const FLASH_SPEED: i32 = 8;
    pub const MIN_ALPHA: u8 = 170;
    pub const MAX_ALPHA: u8 = 255;

    /// Per-tick velocity scale
    pub const SPEED_MULTIPLIER: f32 = 1.2;
    /// Speed boost on wall bounce (multiplicative)
    pub const BOUNCE_BOOST: f32 = 1.2;
    /// Per-axis speed cap
    pub const MAX_SPEED: f32 = 30.0;

    /// Player ball defaults
    pub const PLAYER_RADIUS: f32 = 30.0;
    pub const MIN_PLAYER_RADIUS: f32 = 5.0;
    pub const PLAYER_ALPHA: u8 = 220;

    /// Player spawn search
    pub const PLAYER_SPAWN_ATTEMPTS: u32 = 200;
    /// Extra gap between the spawned player and any hazard
    pub const PLAYER_HAZARD_CLEARANCE: f32 = 500.0;
    /// Extra gap between the spawned player and any hole
    pub const PLAYER_HOLE_CLEARANCE: f32 = 50.0;

    /// Minimum hole spacing, in hole radii
    pub const HOLE_SPACING: f32 = 3.0;
    /// Minimum hazard spacing, in hazard radii (no overlap)
    pub const HAZARD_SPACING: f32 = 2.0;
    /// Hazards keep this multiple of (hazard + hole radius) away from holes
    pub const HAZARD_HOLE_CLEARANCE: f32 = 2.0;
}

/// Circle-circle overlap test (touching counts as overlapping)
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    a.distance_squared(b) <= reach * reach
}
