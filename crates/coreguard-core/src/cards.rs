//! Static card catalog of immutable tuning templates.
//!
//! Deck, discard, and hand hold `&'static CardDef` references; the same
//! template appears once per physical card slot. Combat stats live in an
//! optional stat block so utility categories stay stat-free.

use serde::Serialize;

use crate::enums::{CardCategory, CardRarity, NodeSubtype};

/// Combat stat block for placeable security-node cards.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NodeStats {
    /// Damage per shot. Zero for pure-utility (slow-only) nodes.
    pub damage: f64,
    /// Range in tiles.
    pub range_tiles: f64,
    /// Shots per second. Ignored when damage is zero.
    pub fire_rate: f64,
    pub subtype: NodeSubtype,
    /// Speed reduction fraction applied to packets in range (0 = none).
    pub slow_power: f64,
}

/// A card template. Immutable; lives in the static catalog.
#[derive(Debug, Serialize)]
pub struct CardDef {
    pub id: &'static str,
    pub name: &'static str,
    /// Energy cost to play.
    pub cost: u32,
    pub category: CardCategory,
    pub rarity: CardRarity,
    pub stats: Option<NodeStats>,
    /// Card id this template upgrades into when fused with itself.
    pub fuses_into: Option<&'static str>,
}

/// Fallback card id for unrecognized advisor suggestions.
pub const DEFAULT_CARD_ID: &str = "pulse_node";

/// The full catalog.
pub static CATALOG: &[CardDef] = &[
    CardDef {
        id: "pulse_node",
        name: "Pulse Node",
        cost: 3,
        category: CardCategory::SecurityNode,
        rarity: CardRarity::Common,
        stats: Some(NodeStats {
            damage: 10.0,
            range_tiles: 2.5,
            fire_rate: 1.5,
            subtype: NodeSubtype::Pulse,
            slow_power: 0.0,
        }),
        fuses_into: Some("pulse_array"),
    },
    CardDef {
        id: "pulse_array",
        name: "Pulse Array",
        cost: 5,
        category: CardCategory::SecurityNode,
        rarity: CardRarity::Uncommon,
        stats: Some(NodeStats {
            damage: 22.0,
            range_tiles: 3.0,
            fire_rate: 1.8,
            subtype: NodeSubtype::Pulse,
            slow_power: 0.0,
        }),
        fuses_into: None,
    },
    CardDef {
        id: "throttle_node",
        name: "Throttle Node",
        cost: 2,
        category: CardCategory::SecurityNode,
        rarity: CardRarity::Common,
        stats: Some(NodeStats {
            damage: 0.0,
            range_tiles: 2.0,
            fire_rate: 0.0,
            subtype: NodeSubtype::Throttle,
            slow_power: 0.45,
        }),
        fuses_into: Some("throttle_grid"),
    },
    CardDef {
        id: "throttle_grid",
        name: "Throttle Grid",
        cost: 4,
        category: CardCategory::SecurityNode,
        rarity: CardRarity::Uncommon,
        stats: Some(NodeStats {
            damage: 0.0,
            range_tiles: 2.5,
            fire_rate: 0.0,
            subtype: NodeSubtype::Throttle,
            slow_power: 0.65,
        }),
        fuses_into: None,
    },
    CardDef {
        id: "lance_node",
        name: "Lance Node",
        cost: 5,
        category: CardCategory::SecurityNode,
        rarity: CardRarity::Uncommon,
        stats: Some(NodeStats {
            damage: 30.0,
            range_tiles: 4.0,
            fire_rate: 0.6,
            subtype: NodeSubtype::Lance,
            slow_power: 0.0,
        }),
        fuses_into: Some("lance_battery"),
    },
    CardDef {
        id: "lance_battery",
        name: "Lance Battery",
        cost: 8,
        category: CardCategory::SecurityNode,
        rarity: CardRarity::Rare,
        stats: Some(NodeStats {
            damage: 70.0,
            range_tiles: 4.5,
            fire_rate: 0.7,
            subtype: NodeSubtype::Lance,
            slow_power: 0.0,
        }),
        fuses_into: None,
    },
    CardDef {
        id: "scatter_node",
        name: "Scatter Node",
        cost: 4,
        category: CardCategory::SecurityNode,
        rarity: CardRarity::Common,
        stats: Some(NodeStats {
            damage: 6.0,
            range_tiles: 1.8,
            fire_rate: 3.2,
            subtype: NodeSubtype::Scatter,
            slow_power: 0.0,
        }),
        fuses_into: None,
    },
    CardDef {
        id: "hotfix",
        name: "Hotfix",
        cost: 2,
        category: CardCategory::TacticalPatch,
        rarity: CardRarity::Common,
        stats: None,
        fuses_into: None,
    },
    CardDef {
        id: "overclock_surge",
        name: "Overclock Surge",
        cost: 3,
        category: CardCategory::SystemOverclock,
        rarity: CardRarity::Uncommon,
        stats: None,
        fuses_into: None,
    },
    CardDef {
        id: "perimeter_firewall",
        name: "Perimeter Firewall",
        cost: 6,
        category: CardCategory::Firewall,
        rarity: CardRarity::Rare,
        stats: None,
        fuses_into: None,
    },
];

/// Look up a card template by id.
pub fn card(id: &str) -> Option<&'static CardDef> {
    CATALOG.iter().find(|c| c.id == id)
}

/// The fallback template. The catalog always contains it.
pub fn default_card() -> &'static CardDef {
    card(DEFAULT_CARD_ID).unwrap_or(&CATALOG[0])
}

/// Card ids making up the starting deck, in pre-shuffle order.
pub static STARTING_DECK: &[&str] = &[
    "pulse_node",
    "pulse_node",
    "pulse_node",
    "pulse_node",
    "throttle_node",
    "throttle_node",
    "scatter_node",
    "scatter_node",
    "lance_node",
    "lance_node",
    "hotfix",
    "overclock_surge",
];
