//! Simulation engine for COREGUARD.
//!
//! Owns the hecs ECS world, advances it once per animation frame, and
//! produces `GameSnapshot`s for the presentation layer. Completely
//! headless (no rendering or network dependency), enabling deterministic
//! testing.

pub mod director;
pub mod economy;
pub mod engine;
pub mod history;
pub mod systems;

pub use coreguard_core as core;
pub use engine::{GameEngine, SimConfig};
