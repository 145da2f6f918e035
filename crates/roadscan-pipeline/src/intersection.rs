//! Pairwise intersection detection and junction classification.
//!
//! Every unordered pair of road segments is tested with the
//! parametric finite-segment intersection formula. Each crossing
//! yields one intersection record; near-coincident crossings are NOT
//! merged, so a physical junction of N roads meeting at one point
//! produces one record per crossing pair. Downstream consumers depend
//! on that cardinality, so any deduplication belongs behind a new
//! operation, not here.

use crate::types::{Intersection, IntersectionType, Point, RoadSegment};

/// Maximum distance in pixels between a segment endpoint and an
/// intersection point for the segment to count as connected.
pub const CONNECTION_TOLERANCE: f64 = 10.0;

/// Denominator magnitude below which two segments are treated as
/// parallel or collinear and report no intersection.
const PARALLEL_EPSILON: f64 = 1e-10;

/// Find all pairwise intersections among the given segments.
///
/// Fewer than two segments short-circuit to an empty list, a normal
/// outcome for sparse images. Records are emitted in pair order
/// (i, j), i < j, with ids `intersection_<n>` numbered in that order.
#[must_use = "returns the detected intersections"]
pub fn find_intersections(segments: &[RoadSegment]) -> Vec<Intersection> {
    if segments.len() < 2 {
        return Vec::new();
    }

    let mut intersections = Vec::new();
    for (i, first) in segments.iter().enumerate() {
        for second in &segments[i + 1..] {
            let Some(point) = line_intersection(
                first.start_point,
                first.end_point,
                second.start_point,
                second.end_point,
            ) else {
                continue;
            };

            let connected = connected_segments(point, segments);
            let intersection_type = classify_junction(connected.len());
            intersections.push(Intersection {
                id: format!("intersection_{}", intersections.len()),
                center_point: point,
                intersection_type,
                connected_segments: connected,
                traffic_signals: None,
                radius: 0.0,
            });
        }
    }
    intersections
}

/// Intersection point of the finite segments `p1`-`p2` and `p3`-`p4`.
///
/// Solves the parametric system for scalars t (along the first
/// segment) and u (along the second); a crossing exists only when
/// both lie in [0, 1]. A denominator within [`PARALLEL_EPSILON`] of
/// zero means parallel or collinear segments: no intersection.
#[must_use]
pub fn line_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    let denom = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / denom;
    let u = -((p1.x - p2.x) * (p1.y - p3.y) - (p1.y - p2.y) * (p1.x - p3.x)) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(Point::new(
            t.mul_add(p2.x - p1.x, p1.x),
            t.mul_add(p2.y - p1.y, p1.y),
        ))
    } else {
        None
    }
}

/// Ids of segments with an endpoint within [`CONNECTION_TOLERANCE`]
/// of `point`, in segment order.
///
/// A flat scan over endpoints; at this input scale a spatial index
/// would change nothing observable.
fn connected_segments(point: Point, segments: &[RoadSegment]) -> Vec<String> {
    segments
        .iter()
        .filter(|seg| {
            point.distance(seg.start_point) <= CONNECTION_TOLERANCE
                || point.distance(seg.end_point) <= CONNECTION_TOLERANCE
        })
        .map(|seg| seg.id.clone())
        .collect()
}

/// Junction topology from the connected-segment count.
///
/// Counts below three (including the plain two-segment crossing)
/// default to a T junction.
const fn classify_junction(connected: usize) -> IntersectionType {
    match connected {
        3 => IntersectionType::TJunction,
        4 => IntersectionType::FourWay,
        n if n > 4 => {
            if looks_like_roundabout(n) {
                IntersectionType::Roundabout
            } else {
                IntersectionType::FourWay
            }
        }
        _ => IntersectionType::TJunction,
    }
}

/// Simplified roundabout test: four or more connected segments.
const fn looks_like_roundabout(connected: usize) -> bool {
    connected >= 4
}
