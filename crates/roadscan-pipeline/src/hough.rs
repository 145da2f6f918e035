//! Straight-line segment extraction from a binary edge map.
//!
//! Wraps [`imageproc::hough::detect_lines`] to find infinite candidate
//! lines by accumulator voting, then walks each polar line across the
//! image collecting runs of edge pixels. Runs shorter than the minimum
//! length are dropped and gaps up to the maximum gap are bridged, so
//! one polar line can yield several finite segments (or none).
//!
//! The classic probabilistic Hough transform visits edge pixels in
//! random order; this walk is a fixed scan, so identical edge maps
//! always produce identical segments.

use image::GrayImage;
use imageproc::hough::{LineDetectionOptions, detect_lines};

use crate::types::Point;

/// Non-maximum suppression radius in (r, angle) accumulator space.
///
/// Close parallel detections (both edges of a lane marking, for
/// example) collapse to the strongest line. Must stay below the
/// narrowest road the width band accepts, or both edges of a narrow
/// road merge into one line.
const SUPPRESSION_RADIUS: u32 = 8;

/// Extract finite line segments from a binary edge map.
///
/// `vote_threshold` is the minimum accumulator count for a candidate
/// line, `min_length` the shortest segment emitted (pixels), and
/// `max_gap` the longest run of non-edge pixels bridged while walking
/// a line.
///
/// Returned endpoints lie on the detected polar line, ordered along
/// the walk direction. An empty edge map yields an empty vector.
#[must_use = "returns the extracted line segments"]
pub fn detect_line_segments(
    edges: &GrayImage,
    vote_threshold: u32,
    min_length: f64,
    max_gap: f64,
) -> Vec<(Point, Point)> {
    let lines = detect_lines(
        edges,
        LineDetectionOptions {
            vote_threshold,
            suppression_radius: SUPPRESSION_RADIUS,
        },
    );

    let mut segments = Vec::new();
    for line in &lines {
        let theta = f64::from(line.angle_in_degrees).to_radians();
        walk_polar_line(
            edges,
            f64::from(line.r),
            theta,
            min_length,
            max_gap,
            &mut segments,
        );
    }

    log::debug!(
        "hough: {} polar lines -> {} segments",
        lines.len(),
        segments.len(),
    );
    segments
}

/// Walk the line `x*cos(theta) + y*sin(theta) = r` across the image,
/// collecting edge-pixel runs into `segments`.
fn walk_polar_line(
    edges: &GrayImage,
    r: f64,
    theta: f64,
    min_length: f64,
    max_gap: f64,
    segments: &mut Vec<(Point, Point)>,
) {
    let (sin, cos) = theta.sin_cos();
    // Closest point of the line to the origin; the line direction is
    // perpendicular to (cos, sin).
    let base = Point::new(r * cos, r * sin);
    let dir = (-sin, cos);

    let Some((t_min, t_max)) = parameter_range(edges, base, dir) else {
        return;
    };

    let position = |t: f64| Point::new(dir.0.mul_add(t, base.x), dir.1.mul_add(t, base.y));

    let mut run_start: Option<f64> = None;
    let mut last_hit = t_min;

    let flush = |start: Option<f64>, end: f64, segments: &mut Vec<(Point, Point)>| {
        if let Some(s) = start
            && end - s >= min_length
        {
            segments.push((position(s), position(end)));
        }
    };

    let mut t = t_min;
    while t <= t_max {
        if is_edge_near(edges, position(t), (cos, sin)) {
            if run_start.is_none() {
                run_start = Some(t);
            }
            last_hit = t;
        } else if run_start.is_some() && t - last_hit > max_gap {
            flush(run_start.take(), last_hit, segments);
        }
        t += 1.0;
    }
    flush(run_start, last_hit, segments);
}

/// Range of line parameters `t` for which `base + t * dir` can fall
/// inside the image, padded by one pixel for rounding.
fn parameter_range(edges: &GrayImage, base: Point, dir: (f64, f64)) -> Option<(f64, f64)> {
    let w = f64::from(edges.width());
    let h = f64::from(edges.height());
    if w == 0.0 || h == 0.0 {
        return None;
    }

    let corners = [
        Point::new(0.0, 0.0),
        Point::new(w, 0.0),
        Point::new(0.0, h),
        Point::new(w, h),
    ];
    let projections = corners
        .iter()
        .map(|c| dir.0.mul_add(c.x - base.x, dir.1 * (c.y - base.y)));

    let mut t_min = f64::INFINITY;
    let mut t_max = f64::NEG_INFINITY;
    for t in projections {
        t_min = t_min.min(t);
        t_max = t_max.max(t);
    }
    Some((t_min - 1.0, t_max + 1.0))
}

/// Whether an edge pixel lies at `pos` or one pixel to either side of
/// it along the line normal. The one-pixel tolerance absorbs the
/// accumulator's 1-degree / 1-pixel quantization.
fn is_edge_near(edges: &GrayImage, pos: Point, normal: (f64, f64)) -> bool {
    for offset in [0.0, 1.0, -1.0] {
        let x = normal.0.mul_add(offset, pos.x).round();
        let y = normal.1.mul_add(offset, pos.y).round();
        if x < 0.0 || y < 0.0 || x >= f64::from(edges.width()) || y >= f64::from(edges.height()) {
            continue;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        if edges.get_pixel(x as u32, y as u32).0[0] > 0 {
            return true;
        }
    }
    false
}
