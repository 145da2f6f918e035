//! Road classification from measured width.
//!
//! Fixed lookup tables mapping pixel width to a functional road
//! category and lane count, and category to a speed-limit estimate.
//! All functions here are pure and total: the `RoadType` enum is
//! closed, so every classification is compiler-checked exhaustive.

use crate::types::RoadType;

/// Classify a road by its measured width in pixels.
///
/// Boundaries are strict: a road measuring exactly 80px is arterial,
/// not highway.
#[must_use]
pub fn road_type_for_width(width: f64) -> RoadType {
    if width > 80.0 {
        RoadType::Highway
    } else if width > 60.0 {
        RoadType::Arterial
    } else if width > 40.0 {
        RoadType::Collector
    } else {
        RoadType::Local
    }
}

/// Lane count for a road of the given width, matching the category
/// boundaries of [`road_type_for_width`].
#[must_use]
pub fn lane_count_for_width(width: f64) -> u32 {
    if width > 80.0 {
        6
    } else if width > 60.0 {
        4
    } else if width > 40.0 {
        2
    } else {
        1
    }
}

/// Speed-limit estimate in km/h for a road category.
#[must_use]
pub const fn speed_limit_for(road_type: RoadType) -> f64 {
    match road_type {
        RoadType::Highway => 120.0,
        RoadType::Arterial => 80.0,
        RoadType::Collector => 60.0,
        RoadType::Local => 40.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_maps_to_road_type() {
        assert_eq!(road_type_for_width(90.0), RoadType::Highway);
        assert_eq!(road_type_for_width(70.0), RoadType::Arterial);
        assert_eq!(road_type_for_width(50.0), RoadType::Collector);
        assert_eq!(road_type_for_width(30.0), RoadType::Local);
        assert_eq!(road_type_for_width(0.0), RoadType::Local);
    }

    #[test]
    fn boundaries_are_strict() {
        assert_eq!(road_type_for_width(80.0), RoadType::Arterial);
        assert_eq!(road_type_for_width(60.0), RoadType::Collector);
        assert_eq!(road_type_for_width(40.0), RoadType::Local);
    }

    #[test]
    fn width_maps_to_lane_count() {
        assert_eq!(lane_count_for_width(90.0), 6);
        assert_eq!(lane_count_for_width(70.0), 4);
        assert_eq!(lane_count_for_width(50.0), 2);
        assert_eq!(lane_count_for_width(30.0), 1);
    }

    #[test]
    fn lane_count_boundaries_match_road_type_boundaries() {
        for width in [0.0, 39.9, 40.0, 40.1, 60.0, 60.1, 80.0, 80.1, 120.0] {
            let lanes = lane_count_for_width(width);
            let expected = match road_type_for_width(width) {
                RoadType::Highway => 6,
                RoadType::Arterial => 4,
                RoadType::Collector => 2,
                RoadType::Local => 1,
            };
            assert_eq!(lanes, expected, "width {width}");
        }
    }

    #[test]
    fn speed_limits_match_categories() {
        assert!((speed_limit_for(RoadType::Highway) - 120.0).abs() < f64::EPSILON);
        assert!((speed_limit_for(RoadType::Arterial) - 80.0).abs() < f64::EPSILON);
        assert!((speed_limit_for(RoadType::Collector) - 60.0).abs() < f64::EPSILON);
        assert!((speed_limit_for(RoadType::Local) - 40.0).abs() < f64::EPSILON);
    }
}
