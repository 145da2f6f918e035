//! Shared types for the roadscan extraction pipeline.

use serde::{Deserialize, Serialize};

/// Re-export `GrayImage` so downstream crates can reference
/// intermediate raster data without depending on `image` directly.
pub use image::GrayImage;

/// A 2D point in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from left edge).
    pub x: f64,
    /// Vertical position (pixels from top edge).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// Axis-aligned bounding box: minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Corner with the smallest x and y.
    pub min: Point,
    /// Corner with the largest x and y.
    pub max: Point,
}

impl Bounds {
    /// Create bounds from two corners.
    #[must_use]
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Returns `true` if `point` lies inside the box (inclusive edges).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Functional road category, derived from measured road width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadType {
    Highway,
    Arterial,
    Collector,
    Local,
}

/// Junction topology, derived from the number of connected segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntersectionType {
    TJunction,
    FourWay,
    Roundabout,
    OnRamp,
    OffRamp,
}

/// Traffic direction of a single lane relative to its parent segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaneDirection {
    Forward,
    Backward,
    Bidirectional,
}

/// A detected straight road element between two points.
///
/// Widths and lengths are in pixel units of the source image; the speed
/// limit is in km/h. Constructed once by the segment detector and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadSegment {
    /// Identifier of the form `segment_<candidate index>`. Indices may
    /// have gaps where line candidates were rejected by the width band.
    pub id: String,
    pub start_point: Point,
    pub end_point: Point,
    pub road_type: RoadType,
    pub num_lanes: u32,
    /// Estimated speed limit in km/h.
    pub speed_limit: f64,
    /// Estimated road width in pixels.
    pub width: f64,
    /// Euclidean length in pixels.
    pub length: f64,
}

impl RoadSegment {
    /// Center line of the segment as its two endpoints.
    #[must_use]
    pub const fn center_line(&self) -> [Point; 2] {
        [self.start_point, self.end_point]
    }
}

/// A point where two road segments cross, with classified topology.
///
/// `connected_segments` holds ids of segments whose endpoints lie near
/// the center point. Every id refers to a segment in the same network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    /// Identifier of the form `intersection_<index>`.
    pub id: String,
    pub center_point: Point,
    pub intersection_type: IntersectionType,
    /// Ids of segments with an endpoint near the center point.
    pub connected_segments: Vec<String>,
    /// Ids of traffic signals governing this intersection, when known.
    pub traffic_signals: Option<Vec<String>>,
    /// Roundabout radius in pixels; 0.0 for other junction types.
    pub radius: f64,
}

/// One directional traffic channel within a road segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    /// Identifier of the form `lane_<segment id>_<lane number>`.
    pub id: String,
    /// Id of the owning segment (a back-reference, not ownership).
    pub road_segment_id: String,
    /// 0-based index, strictly less than the parent's `num_lanes`.
    pub lane_number: u32,
    pub start_point: Point,
    pub end_point: Point,
    /// Lane width in pixels: parent width / parent lane count.
    pub width: f64,
    pub direction: LaneDirection,
}

/// Complete road network extracted from one image.
///
/// Owns all segments, intersections, and lanes. Collection order is
/// detection order and carries no semantic meaning. Derives `PartialEq`
/// so two runs over the same input can be compared whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadNetwork {
    /// Identifier derived from the input pixels, stable across runs.
    pub id: String,
    pub segments: Vec<RoadSegment>,
    pub intersections: Vec<Intersection>,
    pub lanes: Vec<Lane>,
    /// Axis-aligned box enclosing every segment endpoint.
    pub bounds: Bounds,
}

impl RoadNetwork {
    /// Look up a segment by id.
    #[must_use]
    pub fn segment_by_id(&self, segment_id: &str) -> Option<&RoadSegment> {
        self.segments.iter().find(|s| s.id == segment_id)
    }

    /// Look up an intersection by id.
    #[must_use]
    pub fn intersection_by_id(&self, intersection_id: &str) -> Option<&Intersection> {
        self.intersections.iter().find(|i| i.id == intersection_id)
    }

    /// All lanes belonging to the given segment, in lane-number order.
    #[must_use]
    pub fn lanes_for_segment(&self, segment_id: &str) -> Vec<&Lane> {
        self.lanes
            .iter()
            .filter(|l| l.road_segment_id == segment_id)
            .collect()
    }

    /// Aggregate metrics over the network.
    #[must_use]
    pub fn metrics(&self) -> NetworkMetrics {
        let total_length: f64 = self.segments.iter().map(|s| s.length).sum();
        let total_lanes: u32 = self.segments.iter().map(|s| s.num_lanes).sum();
        let avg_speed_limit_kmh = if self.segments.is_empty() {
            0.0
        } else {
            let sum: f64 = self.segments.iter().map(|s| s.speed_limit).sum();
            #[allow(clippy::cast_precision_loss)]
            let count = self.segments.len() as f64;
            sum / count
        };

        NetworkMetrics {
            total_length_km: total_length / 1000.0,
            total_lanes,
            avg_speed_limit_kmh,
            num_segments: self.segments.len(),
            num_intersections: self.intersections.len(),
        }
    }
}

/// Summary statistics for a road network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkMetrics {
    pub total_length_km: f64,
    pub total_lanes: u32,
    /// 0.0 when the network has no segments.
    pub avg_speed_limit_kmh: f64,
    pub num_segments: usize,
    pub num_intersections: usize,
}

/// Configuration for one extraction run.
///
/// All parameters default to the fixed values of the extraction
/// algorithm. A config is passed by reference into each run; the
/// pipeline reads no process-global state, so concurrent runs with
/// different configs are independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Minimum accepted road width in pixels. Candidates measuring
    /// narrower are discarded.
    pub min_road_width: f64,

    /// Maximum accepted road width in pixels. Also bounds the
    /// perpendicular sampling range of the width estimator.
    pub max_road_width: f64,

    /// Reserved for future intersection refinement. Recognized but not
    /// used by the base algorithm.
    pub intersection_detection_threshold: f64,

    /// Gaussian smoothing sigma, equivalent to a fixed 5x5 kernel.
    pub blur_sigma: f32,

    /// Neighborhood radius of the adaptive binarization, in pixels.
    /// The (2r+1)-square window must be wider than `max_road_width`,
    /// otherwise the interiors of wide roads binarize as background.
    pub threshold_block_radius: u32,

    /// Canny edge detector low threshold.
    pub canny_low: f32,

    /// Canny edge detector high threshold.
    pub canny_high: f32,

    /// Minimum accumulator votes for a candidate line.
    pub hough_vote_threshold: u32,

    /// Minimum length in pixels for an extracted line segment.
    pub min_line_length: f64,

    /// Maximum run of non-edge pixels bridged when walking a line.
    pub max_line_gap: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_road_width: 10.0,
            max_road_width: 100.0,
            intersection_detection_threshold: 0.7,
            blur_sigma: 1.1,
            threshold_block_radius: 50,
            canny_low: 50.0,
            canny_high: 150.0,
            hough_vote_threshold: 50,
            min_line_length: 50.0,
            max_line_gap: 10.0,
        }
    }
}

/// Errors that can occur during extraction.
///
/// Only unreadable input surfaces as an error; every geometric edge
/// case inside the pipeline degrades to a default value or an empty
/// collection, so a decoded image always yields a well-formed network.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,
}
