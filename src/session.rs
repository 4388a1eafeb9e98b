//! Game session: rounds plus the progression layer
//!
//! Control flow per round:
//! 1. `start_round` consumes armed modifiers and builds the round
//! 2. `tick` once per frame until the round is over
//! 3. `settle` after the result delay: score for a win, then the achievement check
//!
//! The presentation layer owns the screens; this only needs the commands.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::achievements::{AchievementTracker, UnlockEvent};
use crate::difficulty::Difficulty;
use crate::economy::{ActionReport, Economy};
use crate::error::Result;
use crate::persistence::AchievementStore;
use crate::settings::Settings;
use crate::sim::{Bounds, Round, RoundOutcome, TickEvents, TickInput, tick};

/// Result of a finished round, available once the display delay has passed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    pub difficulty: Difficulty,
    pub outcome: RoundOutcome,
    /// `all_balls_absorbed`, `time_survived` or `lose`
    pub reason: &'static str,
    pub score_awarded: u64,
    pub total_score: u64,
    pub achievement: Option<UnlockEvent>,
}

/// HUD snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub elapsed_ms: u64,
    pub remaining_ms: u64,
    pub total_score: u64,
    pub owned_items: BTreeMap<&'static str, u32>,
    pub active_items: BTreeMap<&'static str, bool>,
}

/// Everything the game keeps between frames
#[derive(Debug)]
pub struct Session<S: AchievementStore, R: Rng = Pcg32> {
    economy: Economy,
    achievements: AchievementTracker<S>,
    round: Option<Round>,
    settled: bool,
    result_delay_ms: u64,
    rng: R,
}

impl<S: AchievementStore> Session<S, Pcg32> {
    /// New session with a freshly seeded RNG
    pub fn new(store: S, settings: &Settings) -> Self {
        let rng = Pcg32::from_rng(&mut rand::rng());
        Self::with_rng(store, settings, rng)
    }
}

impl<S: AchievementStore, R: Rng> Session<S, R> {
    pub fn with_rng(store: S, settings: &Settings, rng: R) -> Self {
        Self {
            economy: Economy::new(),
            achievements: AchievementTracker::load(store),
            round: None,
            settled: false,
            result_delay_ms: settings.result_delay_ms,
            rng,
        }
    }

    /// Start (or restart) a round from a difficulty tag
    pub fn start_round(&mut self, tag: &str, bounds: Bounds, now_ms: u64) -> Result<&Round> {
        let difficulty: Difficulty = tag.parse()?;
        Ok(self.start_round_with(difficulty, bounds, now_ms))
    }

    /// Start (or restart) a round. Any round in progress is discarded.
    pub fn start_round_with(&mut self, difficulty: Difficulty, bounds: Bounds, now_ms: u64) -> &Round {
        let modifiers = self.economy.consume_active_modifiers();
        if !modifiers.is_empty() {
            log::info!("Applying modifiers: {:?}", modifiers);
        }
        let round = Round::new(&mut self.rng, difficulty, bounds, modifiers, now_ms);
        self.settled = false;
        self.round.insert(round)
    }

    /// Advance the current round by one frame
    pub fn tick(&mut self, input: &TickInput) -> TickEvents {
        match self.round.as_mut() {
            Some(round) => tick(round, input),
            None => TickEvents::default(),
        }
    }

    /// Apply a finished round to score and achievements.
    ///
    /// Returns `None` while the round is running, during the result delay,
    /// and after the round has already been settled.
    pub fn settle(&mut self, now_ms: u64) -> Option<RoundReport> {
        if self.settled {
            return None;
        }
        let round = self.round.as_ref()?;
        let ended_at = round.ended_at_ms?;
        if now_ms.saturating_sub(ended_at) < self.result_delay_ms {
            return None;
        }

        let difficulty = round.difficulty;
        let outcome = round.outcome;
        self.settled = true;

        let score_awarded = if outcome.is_win() {
            self.economy.add_score(difficulty)
        } else {
            0
        };
        let achievement = self
            .achievements
            .on_round_completed(difficulty, outcome, now_ms);

        Some(RoundReport {
            difficulty,
            outcome,
            reason: outcome.reason().unwrap_or("lose"),
            score_awarded,
            total_score: self.economy.total_score(),
            achievement,
        })
    }

    pub fn buy_item(&mut self, key: &str) -> ActionReport {
        ActionReport::from_result(self.economy.buy_item(key))
    }

    pub fn use_item(&mut self, key: &str) -> ActionReport {
        ActionReport::from_result(self.economy.use_item(key))
    }

    /// Arm one of every owned item for the next round
    pub fn use_all_items(&mut self) -> ActionReport {
        if self.economy.use_all_owned_items() {
            ActionReport {
                success: true,
                message: "Items armed! They take effect next round".into(),
            }
        } else {
            ActionReport {
                success: false,
                message: "No items to use, buy some first".into(),
            }
        }
    }

    pub fn status(&self, now_ms: u64) -> Status {
        let (elapsed_ms, remaining_ms) = match &self.round {
            Some(round) => (round.elapsed_ms(now_ms), round.remaining_ms(now_ms)),
            None => (0, crate::consts::TIME_LIMIT_MS),
        };
        Status {
            elapsed_ms,
            remaining_ms,
            total_score: self.economy.total_score(),
            owned_items: self.economy.owned_items(),
            active_items: self.economy.active_items(),
        }
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn economy_mut(&mut self) -> &mut Economy {
        &mut self.economy
    }

    pub fn achievements(&self) -> &AchievementTracker<S> {
        &self.achievements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::AchievementKey;
    use crate::error::GameError;
    use crate::persistence::MemoryStore;
    use crate::sim::{HazardBall, Hole};
    use glam::Vec2;

    fn session() -> Session<MemoryStore> {
        Session::with_rng(MemoryStore::new(), &Settings::default(), Pcg32::seed_from_u64(8))
    }

    /// Replace the random layout with one hazard sitting on a hole
    fn rig_instant_absorption(session: &mut Session<MemoryStore>) {
        let round = session.round.as_mut().expect("round started");
        round.player.pos = Vec2::new(50.0, 50.0);
        round.hazards = vec![HazardBall::new(
            1,
            Vec2::new(500.0, 300.0),
            Vec2::ZERO,
            10.0,
            crate::sim::BallColor::Red,
        )];
        round.holes = vec![Hole {
            id: 2,
            pos: Vec2::new(505.0, 300.0),
            radius: 12.0,
        }];
    }

    fn input_at(now_ms: u64) -> TickInput {
        TickInput {
            pointer: Vec2::new(50.0, 50.0),
            bounds: Bounds::default(),
            now_ms,
        }
    }

    #[test]
    fn test_unknown_difficulty_tag() {
        let mut session = session();
        let result = session.start_round("extreme", Bounds::default(), 0);
        assert!(matches!(result, Err(GameError::InvalidDifficulty(_))));
        assert!(session.round().is_none());
    }

    #[test]
    fn test_full_round_win_flow() {
        let mut session = session();
        session
            .start_round("easy", Bounds::default(), 1_000)
            .expect("valid tag");
        rig_instant_absorption(&mut session);

        let events = session.tick(&input_at(1_016));
        assert!(events.ended);
        assert_eq!(
            session.round().map(|r| r.outcome),
            Some(RoundOutcome::WonAbsorption)
        );

        // Result delay still running
        assert_eq!(session.settle(1_500), None);
        assert_eq!(session.economy().total_score(), 0);

        let report = session.settle(2_016).expect("delay elapsed");
        assert_eq!(report.reason, "all_balls_absorbed");
        assert_eq!(report.score_awarded, 1);
        assert_eq!(report.total_score, 1);
        assert_eq!(
            report.achievement.map(|a| a.key),
            Some(AchievementKey::FirstEasy)
        );
        assert_eq!(session.achievements().store().writes, 1);

        // Settling is once per round
        assert_eq!(session.settle(5_000), None);
        assert_eq!(session.economy().total_score(), 1);
    }

    #[test]
    fn test_second_win_scores_without_unlock() {
        let mut session = session();
        for start in [0, 20_000] {
            session.start_round_with(Difficulty::Normal, Bounds::default(), start);
            rig_instant_absorption(&mut session);
            session.tick(&input_at(start + 16));
            let report = session.settle(start + 2_000).expect("settled");
            assert_eq!(report.score_awarded, 2);
            if start > 0 {
                assert_eq!(report.achievement, None);
            }
        }
        assert_eq!(session.economy().total_score(), 4);
        assert_eq!(session.achievements().store().writes, 1);
    }

    #[test]
    fn test_loss_awards_nothing() {
        let mut session = session();
        session.start_round_with(Difficulty::Hell, Bounds::default(), 0);
        rig_instant_absorption(&mut session);
        if let Some(round) = session.round.as_mut() {
            // Second hazard parked right where the pointer will be
            round.hazards.push(HazardBall::new(
                3,
                Vec2::new(60.0, 50.0),
                Vec2::ZERO,
                5.0,
                crate::sim::BallColor::Blue,
            ));
        }
        session.tick(&input_at(16));
        assert_eq!(session.round().map(|r| r.outcome), Some(RoundOutcome::Lost));

        let report = session.settle(1_016).expect("settled");
        assert_eq!(report.reason, "lose");
        assert_eq!(report.score_awarded, 0);
        assert_eq!(report.achievement, None);
        assert_eq!(session.achievements().unlocked_count(), 0);
    }

    #[test]
    fn test_items_apply_to_next_round_only() {
        let mut session = session();
        session.economy_mut().add_score(Difficulty::Hell);

        assert!(session.buy_item("item1").success);
        assert!(session.buy_item("item2").success);
        assert_eq!(session.status(0).total_score, 7);
        assert!(session.use_all_items().success);
        assert_eq!(session.status(0).active_items["item1"], true);

        let round = session.start_round_with(Difficulty::Easy, Bounds::default(), 0);
        assert!(round.holes.iter().all(|h| h.radius == 50.0));
        assert_eq!(round.player.radius, 15.0);
        assert_eq!(session.status(0).active_items["item1"], false);

        let round = session.start_round_with(Difficulty::Easy, Bounds::default(), 0);
        assert!(round.holes.iter().all(|h| h.radius == 25.0));
        assert_eq!(round.player.radius, 30.0);
    }

    #[test]
    fn test_item_command_failures() {
        let mut session = session();
        let report = session.buy_item("item1");
        assert!(!report.success);
        assert!(!session.use_item("item2").success);
        assert!(!session.use_all_items().success);
        assert!(!session.buy_item("potion").success);
    }

    #[test]
    fn test_status_without_round() {
        let session = session();
        let status = session.status(123);
        assert_eq!(status.elapsed_ms, 0);
        assert_eq!(status.remaining_ms, crate::consts::TIME_LIMIT_MS);
        assert_eq!(status.owned_items.len(), 2);
    }

    #[test]
    fn test_restart_discards_unsettled_round() {
        let mut session = session();
        session.start_round_with(Difficulty::Easy, Bounds::default(), 0);
        rig_instant_absorption(&mut session);
        session.tick(&input_at(16));

        // Restart before the result delay; the old win is dropped
        session.start_round_with(Difficulty::Easy, Bounds::default(), 100);
        assert_eq!(session.settle(5_000), None);
        assert_eq!(session.economy().total_score(), 0);
    }
}
