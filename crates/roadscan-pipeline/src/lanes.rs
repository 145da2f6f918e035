//! Per-lane centerline generation.
//!
//! Each road segment is split into `num_lanes` lanes of equal width,
//! offset symmetrically from the segment centerline along its
//! perpendicular. The lower-indexed half runs forward, the rest
//! backward, representing opposing traffic.

use crate::types::{Lane, LaneDirection, Point, RoadSegment};

/// Generate the lanes of a single road segment.
///
/// Lane `i` is offset by `(i - num_lanes / 2 + 0.5) * lane_width`
/// along the segment perpendicular (integer division for the
/// midpoint, matching the direction split at `num_lanes / 2`). Lane
/// widths always sum to the segment width.
///
/// Degenerate segments with coincident endpoints have no
/// perpendicular; their lanes coincide with the segment endpoints.
#[must_use = "returns the generated lanes"]
pub fn generate_lanes(segment: &RoadSegment) -> Vec<Lane> {
    let num_lanes = segment.num_lanes;
    if num_lanes == 0 {
        return Vec::new();
    }
    let lane_width = segment.width / f64::from(num_lanes);

    let dx = segment.end_point.x - segment.start_point.x;
    let dy = segment.end_point.y - segment.start_point.y;
    let length = dx.hypot(dy);
    let (perp_x, perp_y) = if length < f64::EPSILON {
        log::debug!("degenerate segment {}, lanes coincide with endpoints", segment.id);
        (0.0, 0.0)
    } else {
        (-dy / length, dx / length)
    };

    (0..num_lanes)
        .map(|lane_number| {
            let offset =
                (f64::from(lane_number) - f64::from(num_lanes / 2) + 0.5) * lane_width;
            let direction = if lane_number < num_lanes / 2 {
                LaneDirection::Forward
            } else {
                LaneDirection::Backward
            };
            Lane {
                id: format!("lane_{}_{lane_number}", segment.id),
                road_segment_id: segment.id.clone(),
                lane_number,
                start_point: Point::new(
                    offset.mul_add(perp_x, segment.start_point.x),
                    offset.mul_add(perp_y, segment.start_point.y),
                ),
                end_point: Point::new(
                    offset.mul_add(perp_x, segment.end_point.x),
                    offset.mul_add(perp_y, segment.end_point.y),
                ),
                width: lane_width,
                direction,
            }
        })
        .collect()
}

/// Generate lanes for every segment, in segment order.
#[must_use = "returns the generated lanes"]
pub fn generate_all(segments: &[RoadSegment]) -> Vec<Lane> {
    segments.iter().flat_map(generate_lanes).collect()
}
