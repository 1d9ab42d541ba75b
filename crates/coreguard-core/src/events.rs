//! Events emitted by the simulation for the presentation layer.
//!
//! The core never models timers for transient feedback; it emits these
//! events once and the renderer decides how long to show anything.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::LogLevel;
use crate::types::GridPos;

/// One-shot events drained into each snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Energy refunded at a world position (kill refund, decompile).
    Refund { amount: u32, at: DVec2 },
    /// A packet was destroyed by damage.
    PacketDestroyed { at: DVec2 },
    /// A packet reached the route end and damaged the core.
    CoreBreach { damage: u32, integrity: u32 },
    /// A node was placed.
    NodePlaced { node: u64, at: GridPos },
    /// A node was decompiled (removed).
    NodeDecompiled { at: GridPos, refund: u32, to_hand: bool },
    /// A node began an animated reroute.
    NodeRerouted { node: u64, to: GridPos, fee: u32 },
    /// Two cards fused into an upgrade.
    CardsFused { result: String },
    /// A wave began spawning.
    WaveStarted { wave: u32, spawns: u32 },
    /// All spawns cleared; advisory round-trip begins.
    WaveResolved { wave: u32, defeated: u32 },
    /// Advisor response applied.
    AdvisorApplied { difficulty: f64 },
    /// Advisor unavailable; static fallback applied.
    AdvisorFallback,
    /// A redemption card was injected into the discard pile.
    RedemptionGranted { card_id: String },
    /// Visual diagnostic response (purely informational).
    DiagnosticReady { weakest_sector: String, suggested_card_id: String },
    /// Core integrity reached zero.
    SessionOver { wave_reached: u32, defeated: u32 },
}

/// Human-readable status line for the in-game log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub tick: u64,
}
