//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Card category. Only `SecurityNode` cards can be placed on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardCategory {
    SecurityNode,
    TacticalPatch,
    SystemOverclock,
    Firewall,
}

/// Card rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardRarity {
    Common,
    Uncommon,
    Rare,
}

/// Malware packet variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PacketVariant {
    /// Baseline packet.
    #[default]
    Standard,
    /// Small, fast, fragile.
    SwarmPacket,
    /// Large, slow, heavily padded.
    ArmoredElite,
    /// Slightly tougher and quicker than baseline.
    StealthWorm,
}

/// Per-variant multipliers, selected once at spawn.
#[derive(Debug, Clone, Copy)]
pub struct VariantProfile {
    /// Hit radius in pixels.
    pub radius: f64,
    /// Multiplier on max health.
    pub health_factor: f64,
    /// Multiplier on base speed.
    pub speed_factor: f64,
}

impl PacketVariant {
    /// Lookup table keyed by variant; no per-variant branching in
    /// update logic.
    pub fn profile(&self) -> VariantProfile {
        match self {
            PacketVariant::Standard => VariantProfile {
                radius: 10.0,
                health_factor: 1.0,
                speed_factor: 1.0,
            },
            PacketVariant::SwarmPacket => VariantProfile {
                radius: 8.0,
                health_factor: 0.6,
                speed_factor: 1.4,
            },
            PacketVariant::ArmoredElite => VariantProfile {
                radius: 15.0,
                health_factor: 2.5,
                speed_factor: 0.7,
            },
            PacketVariant::StealthWorm => VariantProfile {
                radius: 12.0,
                health_factor: 1.2,
                speed_factor: 1.1,
            },
        }
    }
}

/// Security node subtype, from the owning card's stat block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeSubtype {
    #[default]
    Pulse,
    Throttle,
    Lance,
    Scatter,
}

/// Wave lifecycle phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Between waves, player may act and start the next wave.
    #[default]
    Idle,
    /// Wave active, spawn queue not yet empty.
    Spawning,
    /// Spawn queue empty, live packets remain.
    Combat,
    /// Wave resolved, awaiting the advisory round-trip.
    Advisory,
    /// Core integrity reached zero. Terminal.
    GameOver,
}

/// Severity for log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Warning,
    Critical,
}
