//! Action rejection reasons.
//!
//! No failure here is fatal: a rejected action leaves the game state
//! untouched and is surfaced to the player through the status log.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a player action was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ActionError {
    #[error("insufficient energy: need {needed}, have {available}")]
    InsufficientEnergy { needed: u32, available: u32 },
    #[error("tile is already occupied")]
    TileOccupied,
    #[error("tile is on the packet route")]
    TileOnRoute,
    #[error("tile is outside the grid")]
    OutOfBounds,
    #[error("card is not a security node")]
    NotASecurityNode,
    #[error("no card at hand slot {0}")]
    InvalidHandIndex(usize),
    #[error("selected cards cannot be fused")]
    InvalidFusionPair,
    #[error("a wave is already in progress")]
    WaveInProgress,
    #[error("actions are locked during the advisory exchange")]
    ActionsLocked,
    #[error("no such node")]
    NodeNotFound,
    #[error("the core has been breached; session over")]
    SessionOver,
}
