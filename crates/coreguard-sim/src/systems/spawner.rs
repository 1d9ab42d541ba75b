//! Spawn system: feeds queued packets onto the route at a fixed cadence.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use coreguard_core::components::Packet;
use coreguard_core::constants::{PACKET_BASE_SPEED, SPAWN_INTERVAL_SECS};
use coreguard_core::enums::PacketVariant;
use coreguard_core::route::Route;

use crate::director;

/// Mutable spawn bookkeeping owned by the engine.
pub struct SpawnState {
    /// Spawns remaining in the current wave.
    pub queue: u32,
    /// Accumulated seconds since the last spawn.
    pub timer_secs: f64,
    /// Monotonic sequence number across the session.
    pub next_seq: u64,
}

/// Accumulate the spawn timer; each interval crossing dequeues one spawn.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    route: &Route,
    state: &mut SpawnState,
    wave: u32,
    difficulty: f64,
    dt: f64,
) {
    if state.queue == 0 {
        return;
    }

    state.timer_secs += dt;
    while state.timer_secs >= SPAWN_INTERVAL_SECS && state.queue > 0 {
        state.timer_secs -= SPAWN_INTERVAL_SECS;
        state.queue -= 1;
        let variant = director::roll_variant(rng, wave);
        spawn_packet(world, route, state, variant, director::base_health(wave) * difficulty);
    }
}

/// Instantiate one packet at the route spawn point.
pub fn spawn_packet(
    world: &mut World,
    route: &Route,
    state: &mut SpawnState,
    variant: PacketVariant,
    base_health: f64,
) -> hecs::Entity {
    let profile = variant.profile();
    let max_health = base_health * profile.health_factor;
    let seq = state.next_seq;
    state.next_seq += 1;

    world.spawn((Packet {
        pos: route.waypoint_px(0),
        health: max_health,
        max_health,
        base_speed: PACKET_BASE_SPEED * profile.speed_factor,
        slow_factor: 1.0,
        route_cursor: 1,
        variant,
        radius: profile.radius,
        spawn_seq: seq,
    },))
}
