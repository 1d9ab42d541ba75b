//! Per-tick systems that operate on the simulation world.
//!
//! Systems are free functions over `&mut World` (or `&World` for the
//! read-only snapshot builder). They own no state; everything lives in
//! components or in the engine.

pub mod node_combat;
pub mod packet_motion;
pub mod projectile_flight;
pub mod snapshot;
pub mod spawner;
