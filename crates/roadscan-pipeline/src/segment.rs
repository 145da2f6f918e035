//! Road segment detection from the binary road mask.
//!
//! Runs Canny edge detection over the mask, extracts straight line
//! candidates with the Hough stage, then filters candidates through
//! the width estimator: only candidates whose measured width falls
//! inside the configured acceptance band become road segments, with
//! type, lane count, and speed limit assigned by the classifier.

use image::GrayImage;

use crate::types::{ExtractionConfig, RoadSegment};
use crate::{classify, hough, width};

/// Minimum allowed Canny threshold.
///
/// A zero low threshold turns every gradient pixel into a potential
/// edge and floods the Hough accumulator.
const MIN_CANNY_THRESHOLD: f32 = 1.0;

/// Detect road segments in a binary road mask.
///
/// Candidate ids are assigned from the raw candidate index, so the
/// emitted `segment_<n>` sequence has gaps where candidates were
/// rejected by the width band.
///
/// Deterministic: the same mask and config always produce the same
/// segments in the same order.
#[must_use = "returns the detected road segments"]
pub fn detect_segments(mask: &GrayImage, config: &ExtractionConfig) -> Vec<RoadSegment> {
    let high = config.canny_high.max(MIN_CANNY_THRESHOLD);
    let low = config.canny_low.clamp(MIN_CANNY_THRESHOLD, high);
    let edges = imageproc::edges::canny(mask, low, high);

    let candidates = hough::detect_line_segments(
        &edges,
        config.hough_vote_threshold,
        config.min_line_length,
        config.max_line_gap,
    );

    let mut segments = Vec::new();
    for (index, (start, end)) in candidates.iter().copied().enumerate() {
        let length = start.distance(end);
        let measured = width::estimate_width(mask, start, end, config.max_road_width);

        if measured < config.min_road_width || measured > config.max_road_width {
            log::debug!(
                "candidate {index}: width {measured:.1}px outside [{:.1}, {:.1}], rejected",
                config.min_road_width,
                config.max_road_width,
            );
            continue;
        }

        let road_type = classify::road_type_for_width(measured);
        segments.push(RoadSegment {
            id: format!("segment_{index}"),
            start_point: start,
            end_point: end,
            road_type,
            num_lanes: classify::lane_count_for_width(measured),
            speed_limit: classify::speed_limit_for(road_type),
            width: measured,
            length,
        });
    }

    log::debug!(
        "accepted {} of {} line candidates as road segments",
        segments.len(),
        candidates.len(),
    );
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RoadType;

    const ROAD: u8 = 0;
    const BACKGROUND: u8 = 255;

    /// Binary mask with a dark horizontal bar (half-open bounds).
    fn bar_mask(w: u32, h: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> GrayImage {
        GrayImage::from_fn(w, h, |x, y| {
            if x >= x0 && x < x1 && y >= y0 && y < y1 {
                image::Luma([ROAD])
            } else {
                image::Luma([BACKGROUND])
            }
        })
    }

    #[test]
    fn blank_mask_yields_no_segments() {
        let mask = GrayImage::from_pixel(200, 200, image::Luma([BACKGROUND]));
        assert!(detect_segments(&mask, &ExtractionConfig::default()).is_empty());
    }

    #[test]
    fn narrow_bar_yields_local_road_segments() {
        // 20px bar: every accepted candidate should measure ~20px and
        // classify as a single-lane local road.
        let mask = bar_mask(300, 300, 20, 140, 280, 160);
        let segments = detect_segments(&mask, &ExtractionConfig::default());

        assert!(!segments.is_empty(), "expected segments along the bar edges");
        for seg in &segments {
            assert!(
                (10.0..=30.0).contains(&seg.width),
                "unexpected width {:.1} for {}",
                seg.width,
                seg.id,
            );
            assert_eq!(seg.road_type, RoadType::Local);
            assert_eq!(seg.num_lanes, 1);
            assert!((seg.speed_limit - 40.0).abs() < f64::EPSILON);
            assert!(seg.length >= 50.0, "short segment {} survived", seg.id);
            assert!(seg.id.starts_with("segment_"));
        }
    }

    #[test]
    fn bar_end_caps_are_too_short_to_survive() {
        // The 20px end caps of the bar are below the minimum line
        // length, so every segment must be roughly horizontal.
        let mask = bar_mask(300, 300, 20, 140, 280, 160);
        let segments = detect_segments(&mask, &ExtractionConfig::default());
        for seg in &segments {
            let dy = (seg.end_point.y - seg.start_point.y).abs();
            assert!(dy <= 5.0, "expected horizontal segments, got dy {dy:.1}");
        }
    }

    #[test]
    fn width_band_rejects_narrow_roads() {
        let mask = bar_mask(300, 300, 20, 140, 280, 160);
        let config = ExtractionConfig {
            min_road_width: 30.0,
            ..ExtractionConfig::default()
        };
        assert!(
            detect_segments(&mask, &config).is_empty(),
            "a 20px bar must not pass a 30px minimum width",
        );
    }

    #[test]
    fn width_band_rejects_over_wide_measurements() {
        // A light marking strip inside a 200px dark field produces
        // line candidates that sample road on both sides and measure
        // the full two-sided range, far over the maximum. The field
        // boundary lines measure one-sided and stay acceptable.
        let mut mask = bar_mask(300, 300, 0, 50, 300, 250);
        for x in 0..300 {
            for y in 148..151 {
                mask.put_pixel(x, y, image::Luma([BACKGROUND]));
            }
        }
        let config = ExtractionConfig {
            max_road_width: 50.0,
            ..ExtractionConfig::default()
        };
        let segments = detect_segments(&mask, &config);

        assert!(!segments.is_empty(), "field boundary segments expected");
        for seg in &segments {
            assert!(seg.width <= config.max_road_width);
            let y = seg.start_point.y;
            assert!(
                !(140.0..=160.0).contains(&y),
                "marking-line candidate at y {y:.0} should have been rejected",
            );
        }
    }

    #[test]
    fn detection_is_deterministic() {
        let mask = bar_mask(300, 300, 20, 140, 280, 160);
        let config = ExtractionConfig::default();
        assert_eq!(detect_segments(&mask, &config), detect_segments(&mask, &config));
    }
}
