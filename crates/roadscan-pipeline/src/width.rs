//! Road width estimation by perpendicular mask sampling.
//!
//! Given a line candidate and the binary road mask, samples the mask
//! at regular offsets along the perpendicular of the line direction
//! from the start point. The spread between the outermost road-colored
//! samples is the width estimate.

use image::GrayImage;

use crate::types::Point;

/// Width assumed when no perpendicular sample reads as road.
pub const DEFAULT_WIDTH: f64 = 30.0;

/// Mask intensity below which a sample counts as road.
const ROAD_INTENSITY_THRESHOLD: u8 = 128;

/// Spacing between perpendicular samples, in pixels.
const SAMPLE_STEP: i32 = 2;

/// Estimate the road width under a line candidate, in pixels.
///
/// Samples the mask at offsets `t` in `[-max_road_width,
/// max_road_width]` (step 2) along the perpendicular from `start`.
/// Offsets whose in-bounds sample is road-colored are recorded; the
/// estimate is the spread between the smallest and largest recorded
/// offset, so a line along one road edge still measures the full
/// crossing. Widths up to twice `max_road_width` are measurable; the
/// acceptance band rejects the excess.
///
/// Degenerate candidates (coincident endpoints) have no defined
/// perpendicular and report width 0.0, which the acceptance band
/// rejects. No road-colored samples at all reports [`DEFAULT_WIDTH`].
#[must_use = "returns the estimated width"]
pub fn estimate_width(mask: &GrayImage, start: Point, end: Point, max_road_width: f64) -> f64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length = dx.hypot(dy);
    if length < f64::EPSILON {
        log::debug!("degenerate line candidate at ({}, {}), width 0", start.x, start.y);
        return 0.0;
    }

    let perp_x = -dy / length;
    let perp_y = dx / length;

    #[allow(clippy::cast_possible_truncation)]
    let range = max_road_width.ceil() as i32;

    let mut min_offset: Option<i32> = None;
    let mut max_offset: Option<i32> = None;

    let mut t = -range;
    while t <= range {
        let sample_x = f64::from(t).mul_add(perp_x, start.x);
        let sample_y = f64::from(t).mul_add(perp_y, start.y);
        if sample_x >= 0.0
            && sample_y >= 0.0
            && sample_x < f64::from(mask.width())
            && sample_y < f64::from(mask.height())
        {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let pixel = mask.get_pixel(sample_x as u32, sample_y as u32).0[0];
            if pixel < ROAD_INTENSITY_THRESHOLD {
                min_offset = Some(min_offset.map_or(t, |m| m.min(t)));
                max_offset = Some(max_offset.map_or(t, |m| m.max(t)));
            }
        }
        t += SAMPLE_STEP;
    }

    match (min_offset, max_offset) {
        (Some(min), Some(max)) => f64::from(max - min),
        _ => DEFAULT_WIDTH,
    }
}
