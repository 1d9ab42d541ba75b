//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Logic lives in the simulation crate's systems.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{NodeSubtype, PacketVariant};
use crate::types::GridPos;

/// A malware packet walking the route toward the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Packet {
    pub pos: DVec2,
    pub health: f64,
    pub max_health: f64,
    /// Speed after the variant factor, before the per-tick slow factor (px/s).
    pub base_speed: f64,
    /// Current-frame speed multiplier. Reset to 1.0 every movement tick;
    /// any active aura must reassert it or the slow decays.
    pub slow_factor: f64,
    /// Index of the next waypoint the packet is moving toward.
    pub route_cursor: usize,
    pub variant: PacketVariant,
    /// Hit radius in pixels, fixed by variant.
    pub radius: f64,
    /// Monotonic spawn sequence number. Tie-break for target selection.
    pub spawn_seq: u64,
}

/// In-flight reroute animation state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RerouteAnim {
    pub from_px: DVec2,
    pub to_px: DVec2,
    pub elapsed_secs: f64,
}

/// A player-placed security node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityNode {
    /// Logical grid position. Updates immediately on reroute start so
    /// occupancy checks see the destination tile.
    pub grid: GridPos,
    /// Visual/targeting pixel position. Lags the grid position while a
    /// reroute animation is in flight.
    pub pos: DVec2,
    /// Owning card template id.
    pub card_id: &'static str,
    pub damage: f64,
    /// Range in pixels (card range in tiles × tile size).
    pub range_px: f64,
    /// Shots per second. Zero for pure-utility nodes.
    pub fire_rate: f64,
    /// Speed reduction fraction for the slow aura (0 = no aura).
    pub slow_power: f64,
    pub subtype: NodeSubtype,
    /// Seconds until the next shot is allowed.
    pub cooldown_secs: f64,
    /// Lifetime kill count.
    pub kills: u32,
    /// Lifetime seconds deployed.
    pub uptime_secs: f64,
    pub anim: Option<RerouteAnim>,
}

/// A projectile homing on one packet.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub pos: DVec2,
    pub target: hecs::Entity,
    pub damage: f64,
    /// Firing node, for kill attribution.
    pub source: Option<hecs::Entity>,
    pub dead: bool,
}
