//! Tests for the shared vocabulary: catalog integrity, variant profiles,
//! grid geometry, and the route containment test.

use glam::DVec2;

use crate::cards::{self, CATALOG, DEFAULT_CARD_ID, STARTING_DECK};
use crate::constants::TILE_SIZE;
use crate::enums::{CardCategory, PacketVariant};
use crate::route::Route;
use crate::types::{ease_out_expo, pixel_to_tile, GridPos};

// ---- Catalog ----

#[test]
fn catalog_ids_are_unique() {
    for (i, a) in CATALOG.iter().enumerate() {
        for b in &CATALOG[i + 1..] {
            assert_ne!(a.id, b.id, "duplicate card id {}", a.id);
        }
    }
}

#[test]
fn fusion_targets_exist_and_upgrade() {
    for def in CATALOG {
        if let Some(target_id) = def.fuses_into {
            let target = cards::card(target_id)
                .unwrap_or_else(|| panic!("{} fuses into unknown {}", def.id, target_id));
            assert_eq!(target.category, def.category);
            assert!(target.cost > def.cost, "{} fusion should upgrade cost", def.id);
        }
    }
}

#[test]
fn default_card_is_a_placeable_node() {
    let def = cards::card(DEFAULT_CARD_ID).expect("default card missing");
    assert_eq!(def.category, CardCategory::SecurityNode);
    assert!(def.stats.is_some());
}

#[test]
fn starting_deck_resolves() {
    for id in STARTING_DECK {
        assert!(cards::card(id).is_some(), "starting deck has unknown {id}");
    }
}

#[test]
fn utility_cards_have_no_stats() {
    for def in CATALOG {
        match def.category {
            CardCategory::SecurityNode => assert!(def.stats.is_some(), "{}", def.id),
            _ => assert!(def.stats.is_none(), "{}", def.id),
        }
    }
}

// ---- Variant profiles ----

#[test]
fn variant_profile_table() {
    let std = PacketVariant::Standard.profile();
    assert_eq!(std.radius, 10.0);
    assert_eq!(std.health_factor, 1.0);
    assert_eq!(std.speed_factor, 1.0);

    let swarm = PacketVariant::SwarmPacket.profile();
    assert_eq!(swarm.radius, 8.0);
    assert_eq!(swarm.health_factor, 0.6);
    assert_eq!(swarm.speed_factor, 1.4);

    let armored = PacketVariant::ArmoredElite.profile();
    assert_eq!(armored.radius, 15.0);
    assert_eq!(armored.health_factor, 2.5);
    assert_eq!(armored.speed_factor, 0.7);

    let worm = PacketVariant::StealthWorm.profile();
    assert_eq!(worm.radius, 12.0);
    assert_eq!(worm.health_factor, 1.2);
    assert_eq!(worm.speed_factor, 1.1);
}

// ---- Grid geometry ----

#[test]
fn tile_pixel_round_trip() {
    let tile = GridPos::new(3, 7);
    let center = tile.center_px();
    assert_eq!(center, DVec2::new(3.5 * TILE_SIZE, 7.5 * TILE_SIZE));
    assert_eq!(pixel_to_tile(center), tile);
    // Anywhere inside the tile maps back to it.
    assert_eq!(
        pixel_to_tile(center + DVec2::new(TILE_SIZE * 0.49, -TILE_SIZE * 0.49)),
        tile
    );
}

// ---- Route ----

#[test]
fn route_contains_segment_tiles() {
    let route = Route::new(vec![
        GridPos::new(0, 2),
        GridPos::new(3, 2),
        GridPos::new(3, 5),
    ]);
    assert!(route.contains(GridPos::new(0, 2)));
    assert!(route.contains(GridPos::new(2, 2)));
    assert!(route.contains(GridPos::new(3, 2)));
    assert!(route.contains(GridPos::new(3, 4)));
    assert!(route.contains(GridPos::new(3, 5)));
    assert!(!route.contains(GridPos::new(1, 3)));
    assert!(!route.contains(GridPos::new(4, 2)));
}

#[test]
fn default_route_is_axis_aligned_and_in_bounds() {
    let route = Route::default_route();
    assert!(route.len() >= 2);
    for w in route.waypoints().windows(2) {
        assert!(w[0].x == w[1].x || w[0].y == w[1].y);
    }
    for wp in route.waypoints() {
        assert!(wp.x >= 0 && wp.x < crate::constants::GRID_WIDTH);
        assert!(wp.y >= 0 && wp.y < crate::constants::GRID_HEIGHT);
    }
}

// ---- Wire format ----

#[test]
fn actions_and_events_are_type_tagged() {
    let action = crate::actions::PlayerAction::PlaceNode {
        hand_index: 2,
        at: GridPos::new(3, 4),
    };
    let json = serde_json::to_value(&action).unwrap();
    assert_eq!(json["type"], "PlaceNode");
    assert_eq!(json["hand_index"], 2);

    let event = crate::events::GameEvent::WaveStarted { wave: 2, spawns: 6 };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "WaveStarted");

    let back: crate::actions::PlayerAction =
        serde_json::from_str(r#"{"type":"StartWave"}"#).unwrap();
    assert!(matches!(back, crate::actions::PlayerAction::StartWave));
}

// ---- Easing ----

#[test]
fn ease_out_expo_endpoints() {
    assert_eq!(ease_out_expo(0.0), 0.0);
    assert_eq!(ease_out_expo(1.0), 1.0);
    assert_eq!(ease_out_expo(1.5), 1.0);
    // Monotonic and front-loaded.
    assert!(ease_out_expo(0.2) > 0.7);
    assert!(ease_out_expo(0.5) < ease_out_expo(0.6));
}
