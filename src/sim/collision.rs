//! Circle collisions between round entities

use super::state::{HazardBall, Hole, Player};
use crate::circles_overlap;

/// Remove every hazard that touches a hole, together with that hole.
///
/// Pairing is one-to-one: a hole swallows a single hazard and is consumed by
/// it, so two hazards touching the same hole leave one of them in play.
/// Returns the number of absorbed pairs.
pub fn absorb_hazards(hazards: &mut Vec<HazardBall>, holes: &mut Vec<Hole>) -> usize {
    let mut swallowed: Vec<u32> = Vec::new();
    let mut consumed: Vec<u32> = Vec::new();

    for hole in holes.iter() {
        let victim = hazards.iter().find(|ball| {
            !swallowed.contains(&ball.id)
                && circles_overlap(ball.pos, ball.radius, hole.pos, hole.radius)
        });
        if let Some(ball) = victim {
            log::debug!("Hole {} absorbed hazard {}", hole.id, ball.id);
            swallowed.push(ball.id);
            consumed.push(hole.id);
        }
    }

    if !swallowed.is_empty() {
        hazards.retain(|ball| !swallowed.contains(&ball.id));
        holes.retain(|hole| !consumed.contains(&hole.id));
    }
    swallowed.len()
}

/// Whether the player touches any hazard
pub fn player_hit(player: &Player, hazards: &[HazardBall]) -> bool {
    hazards
        .iter()
        .any(|ball| circles_overlap(player.pos, player.radius, ball.pos, ball.radius))
}
