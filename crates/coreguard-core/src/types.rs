//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::TILE_SIZE;

/// Tile coordinate on the defense grid. Signed so neighbor math never
/// underflows at the border.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Pixel center of this tile.
    pub fn center_px(&self) -> DVec2 {
        DVec2::new(
            (self.x as f64 + 0.5) * TILE_SIZE,
            (self.y as f64 + 0.5) * TILE_SIZE,
        )
    }
}

/// Tile containing the given pixel position.
pub fn pixel_to_tile(px: DVec2) -> GridPos {
    GridPos::new(
        (px.x / TILE_SIZE).floor() as i32,
        (px.y / TILE_SIZE).floor() as i32,
    )
}

/// Simulation time tracking. Advanced by the caller-supplied frame delta,
/// not a fixed internal rate: the loop is driven by an external
/// animation-frame signal.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Exponential ease-out used by the reroute animation.
/// Exactly 1.0 at t >= 1 so the node lands on its target pixel.
pub fn ease_out_expo(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-10.0 * t)
    }
}
