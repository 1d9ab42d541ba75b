//! The fixed enemy route: an ordered polyline of grid waypoints from the
//! spawn tile to the core, with axis-aligned segments.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::types::GridPos;

/// Ordered waypoint sequence. Shared, read-only, set once per session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    waypoints: Vec<GridPos>,
}

impl Route {
    /// Build a route from axis-aligned waypoints. Adjacent waypoints must
    /// share a row or a column.
    pub fn new(waypoints: Vec<GridPos>) -> Self {
        debug_assert!(waypoints.len() >= 2, "route needs at least two waypoints");
        debug_assert!(
            waypoints
                .windows(2)
                .all(|w| w[0].x == w[1].x || w[0].y == w[1].y),
            "route segments must be axis-aligned"
        );
        Self { waypoints }
    }

    /// The session map: spawn at the west edge, core at the east edge,
    /// with two bends to leave placement pockets.
    pub fn default_route() -> Self {
        Self::new(vec![
            GridPos::new(0, 4),
            GridPos::new(4, 4),
            GridPos::new(4, 1),
            GridPos::new(9, 1),
            GridPos::new(9, 6),
            GridPos::new(13, 6),
        ])
    }

    pub fn waypoints(&self) -> &[GridPos] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// First waypoint (spawn tile).
    pub fn spawn(&self) -> GridPos {
        self.waypoints[0]
    }

    /// Pixel center of waypoint `i`.
    pub fn waypoint_px(&self, i: usize) -> DVec2 {
        self.waypoints[i].center_px()
    }

    /// Segment containment test: is this tile on the route?
    /// Placement and reroute use it to keep nodes off the packet lane.
    pub fn contains(&self, tile: GridPos) -> bool {
        self.waypoints.windows(2).any(|seg| {
            let (a, b) = (seg[0], seg[1]);
            if a.x == b.x {
                tile.x == a.x && in_span(tile.y, a.y, b.y)
            } else {
                tile.y == a.y && in_span(tile.x, a.x, b.x)
            }
        })
    }
}

fn in_span(v: i32, a: i32, b: i32) -> bool {
    v >= a.min(b) && v <= a.max(b)
}
