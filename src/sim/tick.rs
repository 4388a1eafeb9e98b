//! Per-frame round update
//!
//! One tick runs, in order: entity updates, hole absorption, player collision,
//! then the win checks. A player hit wins over a win in the same tick.

use glam::Vec2;

use super::collision::{absorb_hazards, player_hit};
use super::physics::step_hazard;
use super::state::{Bounds, EntityKind, Round, RoundOutcome};

/// Inputs sampled from the presentation layer for a single tick
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    /// Pointer position in window coordinates
    pub pointer: Vec2,
    /// Current window size
    pub bounds: Bounds,
    /// Game-clock reading (ms)
    pub now_ms: u64,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickEvents {
    /// Hazard/hole pairs removed this tick
    pub absorbed: usize,
    /// True on the tick the round reached a terminal outcome
    pub ended: bool,
}

/// Per-kind entity update
fn update_kind(round: &mut Round, kind: EntityKind, input: &TickInput) {
    match kind {
        EntityKind::Player => round.player.follow(input.pointer),
        EntityKind::Hazard => {
            for ball in &mut round.hazards {
                step_hazard(ball, input.bounds);
            }
        }
        // Holes never move
        EntityKind::Hole => {}
    }
}

/// Advance the round by one frame. Terminal rounds are left untouched.
pub fn tick(round: &mut Round, input: &TickInput) -> TickEvents {
    if round.is_over() {
        return TickEvents::default();
    }

    for kind in [EntityKind::Player, EntityKind::Hazard, EntityKind::Hole] {
        update_kind(round, kind, input);
    }

    let absorbed = absorb_hazards(&mut round.hazards, &mut round.holes);

    let outcome = if player_hit(&round.player, &round.hazards) {
        RoundOutcome::Lost
    } else if round.hazards.is_empty() {
        RoundOutcome::WonAbsorption
    } else if round.elapsed_ms(input.now_ms) >= round.time_limit_ms {
        RoundOutcome::WonSurvival
    } else {
        RoundOutcome::Pending
    };

    let ended = outcome.is_terminal();
    if ended {
        round.outcome = outcome;
        round.ended_at_ms = Some(input.now_ms);
        log::info!(
            "Round over: {} on {} after {} ms",
            outcome.reason().unwrap_or("pending"),
            round.difficulty,
            round.elapsed_ms(input.now_ms)
        );
    }

    TickEvents { absorbed, ended }
}
