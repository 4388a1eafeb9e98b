//! Round simulation module
//!
//! All gameplay logic lives here:
//! - Entity model and round state
//! - Spawn placement
//! - Hazard physics and opacity breathing
//! - Win/lose evaluation per tick
//!
//! No rendering, input polling or storage. Randomness comes from a
//! caller-supplied RNG and time from caller-supplied game-clock readings.

pub mod collision;
pub mod physics;
pub mod placement;
pub mod state;
pub mod tick;

pub use collision::{absorb_hazards, player_hit};
pub use placement::{find_player_spot, place_hazards, place_holes, place_player};
pub use state::{
    BallColor, Bounds, EntityKind, EntityView, HazardBall, Hole, Player, Round, RoundOutcome,
};
pub use tick::{TickEvents, TickInput, tick};
