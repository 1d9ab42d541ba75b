//! Game state snapshot: the complete visible state produced each tick.
//!
//! The rendering layer is a read-only observer of these snapshots; it
//! never touches the simulation world directly.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{NodeSubtype, PacketVariant, WavePhase};
use crate::events::{GameEvent, LogEntry};
use crate::types::{GridPos, SimTime};

/// Complete game state built after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub time: SimTime,
    pub phase: WavePhase,
    pub wave: u32,
    pub core_integrity: u32,
    pub energy: u32,
    pub defeated_count: u32,
    /// Multiplier applied to newly spawned packet health.
    pub difficulty: f64,
    /// Spawns remaining in the current wave.
    pub spawn_queue: u32,
    /// True while the advisory round-trip gates player actions.
    pub actions_locked: bool,
    pub hand: Vec<CardView>,
    pub deck_count: usize,
    pub discard_count: usize,
    pub packets: Vec<PacketView>,
    pub nodes: Vec<NodeView>,
    pub projectiles: Vec<ProjectileView>,
    /// One-shot events since the previous snapshot.
    pub events: Vec<GameEvent>,
    /// Most recent status log lines.
    pub log: Vec<LogEntry>,
}

/// A card in hand, as the UI sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardView {
    pub id: String,
    pub name: String,
    pub cost: u32,
    pub fusable: bool,
}

/// A live packet on the route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacketView {
    pub pos: DVec2,
    pub health: f64,
    pub max_health: f64,
    pub variant: PacketVariant,
    pub radius: f64,
    /// Effective speed multiplier applied on the last movement tick.
    pub slowed: bool,
}

/// A placed security node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeView {
    /// Stable id for action targeting (decompile, reroute).
    pub id: u64,
    pub grid: GridPos,
    pub pos: DVec2,
    pub card_id: String,
    pub subtype: NodeSubtype,
    pub range_px: f64,
    pub kills: u32,
    pub uptime_secs: f64,
    pub relocating: bool,
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub pos: DVec2,
}

/// Persisted summary of one finished session. Input to the advisory and
/// redemption calls and to failure-trend detection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SessionSummary {
    pub wave_reached: u32,
    pub defeated_count: u32,
    /// Unix seconds at session end.
    pub timestamp: u64,
}
