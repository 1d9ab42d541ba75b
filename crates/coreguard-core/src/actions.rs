//! Player actions applied to the simulation.
//!
//! Actions are validated synchronously between ticks; an invalid action
//! mutates nothing and yields an `ActionError`.

use serde::{Deserialize, Serialize};

use crate::types::GridPos;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerAction {
    /// Begin the next wave (only from the idle phase).
    StartWave,
    /// Place the hand card at `hand_index` on the given tile.
    PlaceNode { hand_index: usize, at: GridPos },
    /// Remove a placed node for a partial refund.
    DecompileNode { node: u64 },
    /// Relocate a placed node to a new tile for a fee.
    RerouteNode { node: u64, to: GridPos },
    /// Fuse two identical hand cards into their upgrade.
    FuseCards { first: usize, second: usize },
    /// Ask the advisor for a visual diagnostic of the current frame.
    /// Purely advisory; the core works if it never answers.
    RequestDiagnostic,
}
