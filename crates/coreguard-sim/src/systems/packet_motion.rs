//! Packet movement along the fixed route.
//!
//! Effective speed is base speed times the current-frame slow factor;
//! the factor is consumed and reset to 1.0 here, so any slow aura must
//! reassert it every tick or the slow decays. Packets that pass the
//! final waypoint are reported back to the engine, which applies core
//! damage and despawns them.

use hecs::{Entity, World};

use coreguard_core::components::Packet;
use coreguard_core::route::Route;

/// Advance all packets by `dt`. Entities that have reached the route end
/// are appended to `reached` (terminal signal, not an error).
pub fn run(world: &mut World, route: &Route, dt: f64, reached: &mut Vec<Entity>) {
    for (entity, packet) in world.query_mut::<&mut Packet>() {
        if packet.route_cursor >= route.len() {
            reached.push(entity);
            continue;
        }

        let speed = packet.base_speed * packet.slow_factor;
        packet.slow_factor = 1.0;

        // Walk waypoints, carrying leftover travel across corners.
        let mut travel = speed * dt;
        while travel > 0.0 && packet.route_cursor < route.len() {
            let target = route.waypoint_px(packet.route_cursor);
            let to_target = target - packet.pos;
            let dist = to_target.length();
            if dist <= travel {
                packet.pos = target;
                packet.route_cursor += 1;
                travel -= dist;
            } else {
                packet.pos += to_target * (travel / dist);
                travel = 0.0;
            }
        }

        if packet.route_cursor >= route.len() {
            reached.push(entity);
        }
    }
}
