//! Projectile homing and hit resolution.
//!
//! A projectile chases its target's current position at a fixed speed.
//! It deals damage at most once: if the target is already dead (or gone)
//! when the projectile updates, it marks itself dead without applying
//! anything. A lethal hit credits the firing node's kill counter.

use hecs::{Entity, World};

use coreguard_core::components::{Packet, Projectile, SecurityNode};
use coreguard_core::constants::{PROJECTILE_HIT_DIST, PROJECTILE_SPEED};

/// Advance all projectiles by `dt`, then despawn the dead ones.
pub fn run(world: &mut World, dt: f64, despawn_buffer: &mut Vec<Entity>) {
    let projectiles: Vec<Entity> = world
        .query::<&Projectile>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();

    for entity in projectiles {
        let (pos, target, damage, source) = match world.get::<&Projectile>(entity) {
            Ok(p) if !p.dead => (p.pos, p.target, p.damage, p.source),
            _ => continue,
        };

        // Target state first; guards dropped before any mutation.
        let target_state = world
            .get::<&Packet>(target)
            .ok()
            .map(|p| (p.pos, p.health));

        let Some((target_pos, target_health)) = target_state else {
            // Target despawned out from under us.
            mark_dead(world, entity);
            continue;
        };

        if target_health <= 0.0 {
            // Already dead: zero damage, die on this same update.
            mark_dead(world, entity);
            continue;
        }

        let to_target = target_pos - pos;
        let dist = to_target.length();
        let step = PROJECTILE_SPEED * dt;

        if dist <= step + PROJECTILE_HIT_DIST {
            // Hit: apply damage exactly once.
            let lethal = match world.get::<&mut Packet>(target) {
                Ok(mut packet) => {
                    packet.health -= damage;
                    packet.health <= 0.0
                }
                Err(_) => false,
            };
            if lethal {
                if let Some(src) = source {
                    if let Ok(mut node) = world.get::<&mut SecurityNode>(src) {
                        node.kills += 1;
                    }
                }
            }
            mark_dead(world, entity);
        } else if let Ok(mut projectile) = world.get::<&mut Projectile>(entity) {
            projectile.pos += to_target * (step / dist);
        }
    }

    // Remove everything that resolved this tick.
    despawn_buffer.clear();
    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if projectile.dead {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

fn mark_dead(world: &mut World, entity: Entity) {
    if let Ok(mut projectile) = world.get::<&mut Projectile>(entity) {
        projectile.dead = true;
    }
}
