//! Round state and entity types
//!
//! A `Round` owns every entity in play. Discarding the round discards them all.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::placement;
use crate::consts::*;
use crate::difficulty::Difficulty;
use crate::economy::Modifiers;

/// Entity variants, used to tag render views and dispatch per-kind updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Hazard,
    Hole,
}

/// Visual color tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallColor {
    White,
    Black,
    Red,
    Green,
    Blue,
}

impl BallColor {
    /// Colors a hazard ball may spawn with
    pub const HAZARD: [BallColor; 3] = [BallColor::Red, BallColor::Green, BallColor::Blue];

    pub fn rgb(&self) -> [u8; 3] {
        match self {
            BallColor::White => [255, 255, 255],
            BallColor::Black => [0, 0, 0],
            BallColor::Red => [255, 0, 0],
            BallColor::Green => [0, 255, 0],
            BallColor::Blue => [0, 0, 255],
        }
    }
}

/// Window bounds (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The cursor-controlled ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
}

impl Player {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self { pos, radius }
    }

    /// Snap to the pointer; the player has no velocity of its own
    pub fn follow(&mut self, pointer: Vec2) {
        self.pos = pointer;
    }
}

/// A bouncing ball the player must avoid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardBall {
    pub id: u32,
    pub pos: Vec2,
    /// Per-tick velocity (before `SPEED_MULTIPLIER`)
    pub vel: Vec2,
    pub radius: f32,
    pub color: BallColor,
    /// Current opacity, kept within [MIN_ALPHA, MAX_ALPHA]
    pub alpha: u8,
    /// Opacity walk direction: -1 fading, +1 brightening
    pub flash_dir: i8,
}

impl HazardBall {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32, color: BallColor) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            color,
            alpha: MAX_ALPHA,
            flash_dir: -1,
        }
    }
}

/// A static black hole; absorbs one hazard and vanishes with it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hole {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
}

/// Render snapshot of one live entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub radius: f32,
    pub color: BallColor,
    pub alpha: u8,
}

/// Round outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Pending,
    /// Every hazard was absorbed
    WonAbsorption,
    /// The time limit ran out with the player untouched
    WonSurvival,
    /// The player touched a hazard
    Lost,
}

impl RoundOutcome {
    pub fn is_terminal(&self) -> bool {
        *self != RoundOutcome::Pending
    }

    pub fn is_win(&self) -> bool {
        matches!(self, RoundOutcome::WonAbsorption | RoundOutcome::WonSurvival)
    }

    /// Reason tag shown by the presentation layer
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            RoundOutcome::Pending => None,
            RoundOutcome::WonAbsorption => Some("all_balls_absorbed"),
            RoundOutcome::WonSurvival => Some("time_survived"),
            RoundOutcome::Lost => Some("lose"),
        }
    }
}

/// One play session from spawn to terminal outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub difficulty: Difficulty,
    pub player: Player,
    /// Live hazards (sorted by id)
    pub hazards: Vec<HazardBall>,
    /// Live holes (sorted by id)
    pub holes: Vec<Hole>,
    /// Game-clock timestamp of round start
    pub started_at_ms: u64,
    pub time_limit_ms: u64,
    pub outcome: RoundOutcome,
    /// Game-clock timestamp of the tick that ended the round
    pub ended_at_ms: Option<u64>,
    /// Modifiers applied at construction
    pub modifiers: Modifiers,
}

impl Round {
    /// Build a fresh round: holes first, then hazards clear of the holes,
    /// then the player as far from both as the spawn search allows.
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        difficulty: Difficulty,
        bounds: Bounds,
        modifiers: Modifiers,
        now_ms: u64,
    ) -> Self {
        let preset = difficulty.preset();
        let hole_radius = modifiers.hole_radius(preset.hole_radius);
        let player_radius = modifiers.player_radius(PLAYER_RADIUS);

        let holes: Vec<Hole> =
            placement::place_holes(rng, bounds, preset.hazard_count, hole_radius)
                .into_iter()
                .zip(1u32..)
                .map(|(pos, id)| Hole {
                    id,
                    pos,
                    radius: hole_radius,
                })
                .collect();

        let first_hazard_id = holes.len() as u32 + 1;
        let hazards: Vec<HazardBall> = placement::place_hazards(
            rng,
            bounds,
            preset.hazard_count,
            preset.hazard_radius,
            &holes,
        )
        .into_iter()
        .zip(first_hazard_id..)
        .map(|(pos, id)| {
            let vel = placement::random_velocity(rng, preset.init_speed);
            let color = placement::random_hazard_color(rng);
            HazardBall::new(id, pos, vel, preset.hazard_radius, color)
        })
        .collect();

        let player_pos = placement::place_player(rng, bounds, player_radius, &hazards, &holes);

        log::info!(
            "Round start: {} ({} hazards r={}, {} holes r={}, player r={}) at {:?}",
            difficulty,
            hazards.len(),
            preset.hazard_radius,
            holes.len(),
            hole_radius,
            player_radius,
            player_pos
        );

        let mut round = Self::from_parts(
            difficulty,
            Player::new(player_pos, player_radius),
            hazards,
            holes,
            now_ms,
        );
        round.modifiers = modifiers;
        round
    }

    /// Assemble a round from already-placed entities
    pub fn from_parts(
        difficulty: Difficulty,
        player: Player,
        hazards: Vec<HazardBall>,
        holes: Vec<Hole>,
        now_ms: u64,
    ) -> Self {
        Self {
            difficulty,
            player,
            hazards,
            holes,
            started_at_ms: now_ms,
            time_limit_ms: TIME_LIMIT_MS,
            outcome: RoundOutcome::Pending,
            ended_at_ms: None,
            modifiers: Modifiers::default(),
        }
    }

    /// Milliseconds since round start; frozen once the round has ended
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        let now = self.ended_at_ms.map_or(now_ms, |end| end.min(now_ms));
        now.saturating_sub(self.started_at_ms)
    }

    /// Milliseconds left before a survival win
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.time_limit_ms.saturating_sub(self.elapsed_ms(now_ms))
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Live entities for rendering: holes, then hazards, then the player on top
    pub fn entities(&self) -> Vec<EntityView> {
        let holes = self.holes.iter().map(|hole| EntityView {
            kind: EntityKind::Hole,
            pos: hole.pos,
            radius: hole.radius,
            color: BallColor::Black,
            alpha: u8::MAX,
        });
        let hazards = self.hazards.iter().map(|ball| EntityView {
            kind: EntityKind::Hazard,
            pos: ball.pos,
            radius: ball.radius,
            color: ball.color,
            alpha: ball.alpha,
        });
        let player = std::iter::once(EntityView {
            kind: EntityKind::Player,
            pos: self.player.pos,
            radius: self.player.radius,
            color: BallColor::White,
            alpha: PLAYER_ALPHA,
        });
        holes.chain(hazards).chain(player).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Player either keeps its clearances or sits at the fallback center
    fn assert_spawn_clear_or_centered(round: &Round, bounds: Bounds) {
        let player = &round.player;
        if player.pos == bounds.center() {
            return;
        }
        for ball in &round.hazards {
            assert!(
                ball.pos.distance(player.pos)
                    >= player.radius + ball.radius + PLAYER_HAZARD_CLEARANCE
            );
        }
        for hole in &round.holes {
            assert!(
                hole.pos.distance(player.pos)
                    >= player.radius + hole.radius + PLAYER_HOLE_CLEARANCE
            );
        }
    }

    #[test]
    fn test_new_round_counts() {
        let mut rng = Pcg32::seed_from_u64(7);
        for difficulty in Difficulty::ALL {
            let round = Round::new(&mut rng, difficulty, Bounds::default(), Modifiers::default(), 0);
            let count = difficulty.preset().hazard_count;
            assert_eq!(round.hazards.len(), count);
            assert_eq!(round.holes.len(), count);
            assert_eq!(round.outcome, RoundOutcome::Pending);
            assert_eq!(round.player.radius, PLAYER_RADIUS);
            assert_spawn_clear_or_centered(&round, Bounds::default());
        }
    }

    #[test]
    fn test_player_spawn_clear_or_centered() {
        let bounds = Bounds::new(2000.0, 1500.0);
        for seed in 0..200 {
            let mut rng = Pcg32::seed_from_u64(seed);
            for difficulty in Difficulty::ALL {
                let round = Round::new(&mut rng, difficulty, bounds, Modifiers::default(), 0);
                assert_spawn_clear_or_centered(&round, bounds);
            }
        }
    }

    #[test]
    fn test_new_round_applies_modifiers() {
        let mut rng = Pcg32::seed_from_u64(11);
        let modifiers = Modifiers {
            enlarge_holes: true,
            shrink_player: true,
        };
        let round = Round::new(&mut rng, Difficulty::Easy, Bounds::default(), modifiers, 0);
        assert!(round.holes.iter().all(|h| h.radius == 50.0));
        assert_eq!(round.player.radius, 15.0);
        assert_eq!(round.modifiers, modifiers);
    }

    #[test]
    fn test_hazard_spawn_state() {
        let mut rng = Pcg32::seed_from_u64(3);
        let round = Round::new(&mut rng, Difficulty::Hell, Bounds::default(), Modifiers::default(), 0);
        for ball in &round.hazards {
            assert_eq!(ball.alpha, MAX_ALPHA);
            assert_eq!(ball.flash_dir, -1);
            assert!(ball.vel.x != 0.0 && ball.vel.y != 0.0);
            assert!(ball.vel.x.abs() <= 12.0 && ball.vel.y.abs() <= 12.0);
            assert!(BallColor::HAZARD.contains(&ball.color));
        }
        // Ids are unique across both groups
        let mut ids: Vec<u32> = round
            .hazards
            .iter()
            .map(|b| b.id)
            .chain(round.holes.iter().map(|h| h.id))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 24);
    }

    #[test]
    fn test_elapsed_and_remaining() {
        let mut round = Round::from_parts(
            Difficulty::Easy,
            Player::new(Vec2::ZERO, PLAYER_RADIUS),
            Vec::new(),
            Vec::new(),
            1_000,
        );
        assert_eq!(round.elapsed_ms(500), 0);
        assert_eq!(round.elapsed_ms(4_000), 3_000);
        assert_eq!(round.remaining_ms(4_000), 7_000);
        assert_eq!(round.remaining_ms(20_000), 0);

        // Frozen after the round ends
        round.outcome = RoundOutcome::Lost;
        round.ended_at_ms = Some(6_000);
        assert_eq!(round.elapsed_ms(9_000), 5_000);
    }

    #[test]
    fn test_entity_views() {
        let mut rng = Pcg32::seed_from_u64(5);
        let round = Round::new(&mut rng, Difficulty::Easy, Bounds::default(), Modifiers::default(), 0);
        let views = round.entities();
        assert_eq!(views.len(), 7);
        assert_eq!(views.last().map(|v| v.kind), Some(EntityKind::Player));
        assert_eq!(
            views.iter().filter(|v| v.kind == EntityKind::Hole).count(),
            3
        );
    }

    #[test]
    fn test_outcome_reasons() {
        assert_eq!(RoundOutcome::Pending.reason(), None);
        assert_eq!(RoundOutcome::WonAbsorption.reason(), Some("all_balls_absorbed"));
        assert_eq!(RoundOutcome::WonSurvival.reason(), Some("time_survived"));
        assert_eq!(RoundOutcome::Lost.reason(), Some("lose"));
        assert!(RoundOutcome::WonSurvival.is_win());
        assert!(!RoundOutcome::Lost.is_win());
        assert!(RoundOutcome::Lost.is_terminal());
    }
}
