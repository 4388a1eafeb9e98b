//! Spawn placement
//!
//! Rejection sampling: draw a uniform candidate, keep it if it clears every
//! previously placed circle, otherwise draw again. Hole and hazard placement
//! retry without limit; the player search gives up after
//! `PLAYER_SPAWN_ATTEMPTS` and falls back to the window center.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{BallColor, Bounds, HazardBall, Hole};
use crate::consts::*;
use crate::error::{GameError, Result};

/// Uniform candidate with the circle kept `2 * radius` away from every edge.
/// An axis too small for that margin collapses to its center.
pub fn random_point<R: Rng + ?Sized>(rng: &mut R, bounds: Bounds, radius: f32) -> Vec2 {
    Vec2::new(
        random_axis(rng, bounds.width, radius),
        random_axis(rng, bounds.height, radius),
    )
}

fn random_axis<R: Rng + ?Sized>(rng: &mut R, extent: f32, radius: f32) -> f32 {
    let low = radius * 2.0;
    let high = extent - radius * 2.0;
    if high > low {
        rng.random_range(low..=high)
    } else {
        extent / 2.0
    }
}

/// Place `count` circles of `radius`, each at least `spacing` from the others
/// and at least `clearance` from every obstacle `(position, clearance)`.
///
/// Retries are unbounded: a window too small to fit the layout never returns.
pub fn scatter<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: Bounds,
    count: usize,
    radius: f32,
    spacing: f32,
    obstacles: &[(Vec2, f32)],
) -> Vec<Vec2> {
    let mut placed: Vec<Vec2> = Vec::with_capacity(count);
    let mut draws = 0u64;

    while placed.len() < count {
        let candidate = random_point(rng, bounds, radius);
        draws += 1;

        let clear_of_group = placed.iter().all(|p| p.distance(candidate) >= spacing);
        let clear_of_obstacles = obstacles
            .iter()
            .all(|&(pos, clearance)| pos.distance(candidate) >= clearance);

        if clear_of_group && clear_of_obstacles {
            placed.push(candidate);
        }
    }

    log::trace!("Placed {} circles (r={}) in {} draws", count, radius, draws);
    placed
}

/// Hole positions, spaced at least `HOLE_SPACING` radii apart
pub fn place_holes<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: Bounds,
    count: usize,
    radius: f32,
) -> Vec<Vec2> {
    scatter(rng, bounds, count, radius, radius * HOLE_SPACING, &[])
}

/// Hazard positions: non-overlapping, and well clear of every hole so no ball
/// starts inside one
pub fn place_hazards<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: Bounds,
    count: usize,
    radius: f32,
    holes: &[Hole],
) -> Vec<Vec2> {
    let obstacles: Vec<(Vec2, f32)> = holes
        .iter()
        .map(|hole| (hole.pos, (radius + hole.radius) * HAZARD_HOLE_CLEARANCE))
        .collect();
    scatter(rng, bounds, count, radius, radius * HAZARD_SPACING, &obstacles)
}

/// Search for a spawn point far from every hazard and hole
pub fn find_player_spot<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: Bounds,
    radius: f32,
    hazards: &[HazardBall],
    holes: &[Hole],
) -> Result<Vec2> {
    for _ in 0..PLAYER_SPAWN_ATTEMPTS {
        let candidate = random_point(rng, bounds, radius);

        let safe_from_hazards = hazards.iter().all(|ball| {
            ball.pos.distance(candidate) >= radius + ball.radius + PLAYER_HAZARD_CLEARANCE
        });
        if !safe_from_hazards {
            continue;
        }

        let safe_from_holes = holes.iter().all(|hole| {
            hole.pos.distance(candidate) >= radius + hole.radius + PLAYER_HOLE_CLEARANCE
        });
        if safe_from_holes {
            return Ok(candidate);
        }
    }

    Err(GameError::PlacementExhausted {
        attempts: PLAYER_SPAWN_ATTEMPTS,
    })
}

/// Player spawn point; falls back to the window center when the search fails.
/// The center may sit right next to a hazard.
pub fn place_player<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: Bounds,
    radius: f32,
    hazards: &[HazardBall],
    holes: &[Hole],
) -> Vec2 {
    match find_player_spot(rng, bounds, radius, hazards, holes) {
        Ok(pos) => pos,
        Err(err) => {
            log::warn!("{err}, spawning player at window center");
            bounds.center()
        }
    }
}

/// Integer per-axis velocity in [-max, max], never zero on either axis
pub fn random_velocity<R: Rng + ?Sized>(rng: &mut R, max: i32) -> Vec2 {
    Vec2::new(nonzero_speed(rng, max), nonzero_speed(rng, max))
}

fn nonzero_speed<R: Rng + ?Sized>(rng: &mut R, max: i32) -> f32 {
    let speed = rng.random_range(-max..=max);
    if speed != 0 {
        speed as f32
    } else if rng.random_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}

pub fn random_hazard_color<R: Rng + ?Sized>(rng: &mut R) -> BallColor {
    BallColor::HAZARD
        .choose(rng)
        .copied()
        .unwrap_or(BallColor::Red)
}
