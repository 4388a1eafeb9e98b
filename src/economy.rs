//! Score economy and one-shot modifier items
//!
//! Lives for the whole process but is not persisted. Buying an item moves it
//! into the inventory; using it arms a modifier for the next round only.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::MIN_PLAYER_RADIUS;
use crate::difficulty::Difficulty;
use crate::error::{GameError, Result};

/// Purchasable items
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Doubles hole radius for one round
    EnlargeHoles,
    /// Halves player radius for one round
    ShrinkPlayer,
}

impl ItemKind {
    pub const ALL: [ItemKind; 2] = [ItemKind::EnlargeHoles, ItemKind::ShrinkPlayer];

    /// Stable key used by commands and display maps
    pub fn key(&self) -> &'static str {
        match self {
            ItemKind::EnlargeHoles => "item1",
            ItemKind::ShrinkPlayer => "item2",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::EnlargeHoles => "Enlarge Holes",
            ItemKind::ShrinkPlayer => "Shrink Player",
        }
    }

    pub fn price(&self) -> u64 {
        match self {
            ItemKind::EnlargeHoles => 2,
            ItemKind::ShrinkPlayer => 1,
        }
    }
}

impl FromStr for ItemKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        ItemKind::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| GameError::ItemNotFound(s.to_string()))
    }
}

/// Modifier effects applied when a round is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub enlarge_holes: bool,
    pub shrink_player: bool,
}

impl Modifiers {
    pub fn is_empty(&self) -> bool {
        !self.enlarge_holes && !self.shrink_player
    }

    pub fn hole_radius(&self, base: f32) -> f32 {
        if self.enlarge_holes { base * 2.0 } else { base }
    }

    pub fn player_radius(&self, base: f32) -> f32 {
        if self.shrink_player {
            (base / 2.0).floor().max(MIN_PLAYER_RADIUS)
        } else {
            base
        }
    }
}

/// Outcome of a user command, ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReport {
    pub success: bool,
    pub message: String,
}

impl ActionReport {
    pub fn from_result(result: Result<String>) -> Self {
        match result {
            Ok(message) => Self {
                success: true,
                message,
            },
            Err(err) => Self {
                success: false,
                message: err.to_string(),
            },
        }
    }
}

/// Score total, item inventory and armed modifiers
#[derive(Debug, Clone, Default)]
pub struct Economy {
    total_score: u64,
    owned: BTreeMap<ItemKind, u32>,
    active: BTreeMap<ItemKind, bool>,
}

impl Economy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    /// Owned count for one item
    pub fn owned(&self, kind: ItemKind) -> u32 {
        self.owned.get(&kind).copied().unwrap_or(0)
    }

    /// Whether an item's modifier is armed for the next round
    pub fn is_active(&self, kind: ItemKind) -> bool {
        self.active.get(&kind).copied().unwrap_or(false)
    }

    /// Owned counts keyed by item key, every item present
    pub fn owned_items(&self) -> BTreeMap<&'static str, u32> {
        ItemKind::ALL
            .into_iter()
            .map(|kind| (kind.key(), self.owned(kind)))
            .collect()
    }

    /// Armed flags keyed by item key, every item present
    pub fn active_items(&self) -> BTreeMap<&'static str, bool> {
        ItemKind::ALL
            .into_iter()
            .map(|kind| (kind.key(), self.is_active(kind)))
            .collect()
    }

    /// Award the win score for a difficulty; returns the amount added
    pub fn add_score(&mut self, difficulty: Difficulty) -> u64 {
        let gained = difficulty.score_on_win();
        self.total_score += gained;
        log::info!(
            "Cleared {}: +{} score, total {}",
            difficulty,
            gained,
            self.total_score
        );
        gained
    }

    /// Award the win score for a difficulty tag
    pub fn add_score_for(&mut self, tag: &str) -> Result<u64> {
        let difficulty: Difficulty = tag.parse()?;
        Ok(self.add_score(difficulty))
    }

    /// Spend score on one item
    pub fn buy_item(&mut self, key: &str) -> Result<String> {
        let kind: ItemKind = key.parse()?;
        let price = kind.price();
        if self.total_score < price {
            return Err(GameError::InsufficientFunds {
                item: kind.name(),
                have: self.total_score,
                price,
            });
        }

        self.total_score -= price;
        *self.owned.entry(kind).or_insert(0) += 1;
        log::info!("Bought {} for {}, {} score left", kind.name(), price, self.total_score);
        Ok(format!(
            "Bought {}! Score left: {}",
            kind.name(),
            self.total_score
        ))
    }

    /// Move one owned item into the next round's modifiers
    pub fn use_item(&mut self, key: &str) -> Result<String> {
        let kind: ItemKind = key.parse()?;
        self.activate(kind)?;
        Ok(format!("{} takes effect next round!", kind.name()))
    }

    /// Use one of every owned item kind. Returns whether anything was armed.
    pub fn use_all_owned_items(&mut self) -> bool {
        let mut any = false;
        for kind in ItemKind::ALL {
            if self.owned(kind) > 0 && self.activate(kind).is_ok() {
                any = true;
            }
        }
        any
    }

    fn activate(&mut self, kind: ItemKind) -> Result<()> {
        match self.owned.get_mut(&kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                self.active.insert(kind, true);
                log::debug!("{} armed for next round", kind.name());
                Ok(())
            }
            _ => Err(GameError::InsufficientItems(kind.name())),
        }
    }

    /// Read and clear the armed modifiers. Called once per round construction.
    pub fn consume_active_modifiers(&mut self) -> Modifiers {
        let modifiers = Modifiers {
            enlarge_holes: self.is_active(ItemKind::EnlargeHoles),
            shrink_player: self.is_active(ItemKind::ShrinkPlayer),
        };
        self.active.clear();
        modifiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn economy_with_score(score: u64) -> Economy {
        let mut economy = Economy::new();
        economy.total_score = score;
        economy
    }

    #[test]
    fn test_add_score_per_difficulty() {
        let mut economy = Economy::new();
        assert_eq!(economy.add_score(Difficulty::Easy), 1);
        assert_eq!(economy.add_score(Difficulty::Normal), 2);
        assert_eq!(economy.add_score(Difficulty::Hell), 10);
        assert_eq!(economy.total_score(), 13);
    }

    #[test]
    fn test_add_score_unknown_tag() {
        let mut economy = Economy::new();
        assert_eq!(
            economy.add_score_for("impossible"),
            Err(GameError::InvalidDifficulty("impossible".to_string()))
        );
        assert_eq!(economy.total_score(), 0);
        assert_eq!(economy.add_score_for("hell"), Ok(10));
    }

    #[test]
    fn test_buy_insufficient_funds() {
        let mut economy = economy_with_score(1);
        let result = economy.buy_item("item1");
        assert!(matches!(result, Err(GameError::InsufficientFunds { have: 1, price: 2, .. })));
        assert_eq!(economy.total_score(), 1);
        assert_eq!(economy.owned(ItemKind::EnlargeHoles), 0);
    }

    #[test]
    fn test_buy_success() {
        let mut economy = economy_with_score(5);
        assert!(economy.buy_item("item1").is_ok());
        assert_eq!(economy.total_score(), 3);
        assert_eq!(economy.owned(ItemKind::EnlargeHoles), 1);

        assert!(economy.buy_item("item2").is_ok());
        assert_eq!(economy.total_score(), 2);
        assert_eq!(economy.owned_items()["item2"], 1);
    }

    #[test]
    fn test_buy_unknown_item() {
        let mut economy = economy_with_score(50);
        assert_eq!(
            economy.buy_item("item9"),
            Err(GameError::ItemNotFound("item9".to_string()))
        );
        assert_eq!(economy.total_score(), 50);
    }

    #[test]
    fn test_use_item_requires_stock() {
        let mut economy = economy_with_score(1);
        assert_eq!(
            economy.use_item("item2"),
            Err(GameError::InsufficientItems("Shrink Player"))
        );
        assert!(!economy.is_active(ItemKind::ShrinkPlayer));

        economy.buy_item("item2").expect("affordable");
        assert!(economy.use_item("item2").is_ok());
        assert_eq!(economy.owned(ItemKind::ShrinkPlayer), 0);
        assert!(economy.is_active(ItemKind::ShrinkPlayer));
    }

    #[test]
    fn test_use_all_owned_items() {
        let mut economy = economy_with_score(5);
        assert!(!economy.use_all_owned_items());

        economy.buy_item("item1").expect("affordable");
        economy.buy_item("item1").expect("affordable");
        assert!(economy.use_all_owned_items());
        assert_eq!(economy.owned(ItemKind::EnlargeHoles), 1);
        assert!(economy.is_active(ItemKind::EnlargeHoles));
        assert!(!economy.is_active(ItemKind::ShrinkPlayer));
    }

    #[test]
    fn test_consume_is_one_shot() {
        let mut economy = economy_with_score(3);
        economy.buy_item("item1").expect("affordable");
        economy.buy_item("item2").expect("affordable");
        assert!(economy.use_all_owned_items());

        let modifiers = economy.consume_active_modifiers();
        assert!(modifiers.enlarge_holes && modifiers.shrink_player);
        assert!(economy.active_items().values().all(|active| !active));

        assert!(economy.consume_active_modifiers().is_empty());
    }

    #[test]
    fn test_modifier_radii() {
        let modifiers = Modifiers {
            enlarge_holes: true,
            shrink_player: true,
        };
        assert_eq!(modifiers.hole_radius(12.0), 24.0);
        assert_eq!(modifiers.player_radius(30.0), 15.0);
        assert_eq!(modifiers.player_radius(9.0), MIN_PLAYER_RADIUS);
        assert_eq!(Modifiers::default().player_radius(30.0), 30.0);
    }

    #[test]
    fn test_action_report() {
        let mut economy = economy_with_score(0);
        let report = ActionReport::from_result(economy.buy_item("item2"));
        assert!(!report.success);
        assert!(report.message.contains("not enough score"));
    }
}
