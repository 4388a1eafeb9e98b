//! Error taxonomy
//!
//! None of these are fatal. Each component turns them into a fallback value
//! at its boundary: economy errors become user-facing messages, placement
//! exhaustion becomes a center spawn, persistence errors become defaults.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("unknown difficulty `{0}`")]
    InvalidDifficulty(String),

    #[error("item `{0}` does not exist")]
    ItemNotFound(String),

    #[error("not enough score to buy {item}: have {have}, need {price}")]
    InsufficientFunds {
        item: &'static str,
        have: u64,
        price: u64,
    },

    #[error("no {0} left to use")]
    InsufficientItems(&'static str),

    #[error("no safe player spawn found after {attempts} attempts")]
    PlacementExhausted { attempts: u32 },

    #[error("failed to read save data: {0}")]
    PersistenceRead(String),

    #[error("failed to write save data: {0}")]
    PersistenceWrite(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
