//! Difficulty presets
//!
//! Three fixed presets; nothing is tunable at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hell,
}

/// Spawn and scoring parameters for one difficulty
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyPreset {
    /// Number of hazard balls (and holes)
    pub hazard_count: usize,
    pub hazard_radius: f32,
    pub hole_radius: f32,
    /// Initial per-axis speed range is [-init_speed, init_speed]
    pub init_speed: i32,
    /// Score awarded for a win
    pub score_on_win: u64,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hell];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hell => "hell",
        }
    }

    pub fn preset(&self) -> DifficultyPreset {
        match self {
            Difficulty::Easy => DifficultyPreset {
                hazard_count: 3,
                hazard_radius: 20.0,
                hole_radius: 25.0,
                init_speed: 3,
                score_on_win: 1,
            },
            Difficulty::Normal => DifficultyPreset {
                hazard_count: 6,
                hazard_radius: 10.0,
                hole_radius: 12.0,
                init_speed: 6,
                score_on_win: 2,
            },
            Difficulty::Hell => DifficultyPreset {
                hazard_count: 12,
                hazard_radius: 5.0,
                hole_radius: 6.0,
                init_speed: 12,
                score_on_win: 10,
            },
        }
    }

    /// Score awarded for winning at this difficulty
    pub fn score_on_win(&self) -> u64 {
        self.preset().score_on_win
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hell" => Ok(Difficulty::Hell),
            _ => Err(GameError::InvalidDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("Normal".parse::<Difficulty>(), Ok(Difficulty::Normal));
        assert_eq!("hell".parse::<Difficulty>(), Ok(Difficulty::Hell));
        assert_eq!(
            "nightmare".parse::<Difficulty>(),
            Err(GameError::InvalidDifficulty("nightmare".to_string()))
        );
    }

    #[test]
    fn test_tag_roundtrip() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.as_str().parse::<Difficulty>(), Ok(difficulty));
        }
    }

    #[test]
    fn test_preset_table() {
        let normal = Difficulty::Normal.preset();
        assert_eq!(normal.hazard_count, 6);
        assert_eq!(normal.init_speed, 6);
        assert_eq!(Difficulty::Easy.score_on_win(), 1);
        assert_eq!(Difficulty::Normal.score_on_win(), 2);
        assert_eq!(Difficulty::Hell.score_on_win(), 10);
        assert_eq!(Difficulty::Hell.preset().hazard_count, 12);
    }
}
