//! Network bounding box calculation.

use crate::types::{Bounds, Point, RoadSegment};

/// Fallback box for networks with no segments.
const EMPTY_BOUNDS: Bounds = Bounds::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0));

/// Tightest axis-aligned box enclosing every segment endpoint.
///
/// An empty segment list returns the fixed fallback box
/// `(0, 0)..(100, 100)` so the network always carries well-formed
/// bounds.
#[must_use]
pub fn network_bounds(segments: &[RoadSegment]) -> Bounds {
    let mut endpoints = segments
        .iter()
        .flat_map(|s| [s.start_point, s.end_point]);

    let Some(first) = endpoints.next() else {
        return EMPTY_BOUNDS;
    };

    let mut bounds = Bounds::new(first, first);
    for p in endpoints {
        bounds.min.x = bounds.min.x.min(p.x);
        bounds.min.y = bounds.min.y.min(p.y);
        bounds.max.x = bounds.max.x.max(p.x);
        bounds.max.y = bounds.max.y.max(p.y);
    }
    bounds
}
