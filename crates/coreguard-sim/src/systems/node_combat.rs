//! Security node update: uptime, reroute animation, slow aura, and
//! cooldown-gated firing.
//!
//! Target acquisition is nearest-in-range by Euclidean distance from the
//! node's current (possibly animating) pixel position. Ties go to the
//! earliest-spawned packet: candidates are sorted by spawn sequence and
//! the strict comparison keeps the first minimum, which keeps replays
//! deterministic regardless of archetype iteration order.

use hecs::{Entity, World};

use coreguard_core::components::{Packet, Projectile, SecurityNode};
use coreguard_core::constants::REROUTE_DURATION_SECS;
use coreguard_core::types::ease_out_expo;

/// Advance all nodes by `dt`, applying slow auras and spawning
/// projectiles for nodes whose cooldown has elapsed.
pub fn run(world: &mut World, dt: f64) {
    // Packet candidates, stable-ordered by spawn sequence. Packets
    // killed earlier this tick still exist until the next movement
    // step; they are not targets.
    let mut candidates: Vec<(Entity, glam::DVec2, u64)> = world
        .query::<&Packet>()
        .iter()
        .filter(|(_, p)| p.health > 0.0)
        .map(|(entity, p)| (entity, p.pos, p.spawn_seq))
        .collect();
    candidates.sort_by_key(|&(_, _, seq)| seq);

    let mut slows: Vec<(Entity, f64)> = Vec::new();
    let mut shots: Vec<(Entity, glam::DVec2, Entity, f64)> = Vec::new();

    for (node_entity, node) in world.query_mut::<&mut SecurityNode>() {
        node.uptime_secs += dt;

        // Reroute animation: the grid position moved at animation start;
        // only the pixel position eases toward it.
        if let Some(anim) = &mut node.anim {
            anim.elapsed_secs += dt;
            let t = (anim.elapsed_secs / REROUTE_DURATION_SECS).min(1.0);
            let f = ease_out_expo(t);
            node.pos = anim.from_px + (anim.to_px - anim.from_px) * f;
            if t >= 1.0 {
                node.pos = anim.to_px;
                node.anim = None;
            }
        }

        // Slow aura: strongest aura wins, no additive stacking.
        if node.slow_power > 0.0 {
            let clamp = 1.0 - node.slow_power;
            for &(packet_entity, packet_pos, _) in &candidates {
                if packet_pos.distance(node.pos) <= node.range_px {
                    slows.push((packet_entity, clamp));
                }
            }
        }

        // Pure-utility nodes never fire.
        if node.damage <= 0.0 {
            continue;
        }

        if node.cooldown_secs > 0.0 {
            node.cooldown_secs -= dt;
            continue;
        }

        let mut nearest: Option<(Entity, f64)> = None;
        for &(packet_entity, packet_pos, _) in &candidates {
            let dist = packet_pos.distance(node.pos);
            if dist > node.range_px {
                continue;
            }
            if nearest.map_or(true, |(_, best)| dist < best) {
                nearest = Some((packet_entity, dist));
            }
        }

        if let Some((target, _)) = nearest {
            shots.push((node_entity, node.pos, target, node.damage));
            node.cooldown_secs = 1.0 / node.fire_rate;
        }
    }

    for (packet_entity, clamp) in slows {
        if let Ok(mut packet) = world.get::<&mut Packet>(packet_entity) {
            packet.slow_factor = packet.slow_factor.min(clamp);
        }
    }

    for (source, origin, target, damage) in shots {
        world.spawn((Projectile {
            pos: origin,
            target,
            damage,
            source: Some(source),
            dead: false,
        },));
    }
}
