//! roadscan-pipeline: road network extraction from raster images (sans-IO).
//!
//! Converts a photograph of road infrastructure into a structured
//! road-network model through:
//! decode/grayscale -> binarize -> edge detection -> line extraction ->
//! width estimation -> classification -> intersections -> lanes -> bounds.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and returns structured data. Transport, storage, and
//! simulator integration are the caller's concern.

use std::hash::Hasher;

use siphasher::sip::SipHasher13;

pub mod bounds;
pub mod classify;
pub mod hough;
pub mod intersection;
pub mod lanes;
pub mod preprocess;
pub mod segment;
pub mod types;
pub mod width;

pub use types::{
    Bounds, ExtractionConfig, GrayImage, Intersection, IntersectionType, Lane, LaneDirection,
    NetworkMetrics, PipelineError, Point, RoadNetwork, RoadSegment, RoadType,
};

/// Run the full extraction pipeline on raw image bytes.
///
/// Decodes the image (PNG, JPEG, BMP), converts it to grayscale, and
/// extracts the road network. The result is always a complete,
/// internally consistent network; sparse or blank images yield empty
/// collections and the fallback bounds rather than an error.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `image_bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image cannot be decoded.
pub fn extract_network(
    image_bytes: &[u8],
    config: &ExtractionConfig,
) -> Result<RoadNetwork, PipelineError> {
    let gray = preprocess::decode_to_grayscale(image_bytes)?;
    Ok(extract_from_grayscale(&gray, config))
}

/// Run the extraction pipeline on an already-decoded grayscale image.
///
/// The infallible core of [`extract_network`]: once an image is
/// decoded, every geometric edge case degrades to a default value or
/// an empty collection, so extraction always terminates with a
/// well-formed network.
///
/// Deterministic: the same pixels and config produce an identical
/// network, including its id.
#[must_use = "returns the extracted road network"]
pub fn extract_from_grayscale(gray: &GrayImage, config: &ExtractionConfig) -> RoadNetwork {
    let mask = preprocess::binarize(gray, config);
    let segments = segment::detect_segments(&mask, config);
    let intersections = intersection::find_intersections(&segments);
    let lanes = lanes::generate_all(&segments);
    let bounds = bounds::network_bounds(&segments);

    let network = RoadNetwork {
        id: network_id(gray),
        segments,
        intersections,
        lanes,
        bounds,
    };
    log::info!(
        "extracted {}: {} segments, {} intersections, {} lanes",
        network.id,
        network.segments.len(),
        network.intersections.len(),
        network.lanes.len(),
    );
    network
}

/// Stable network identity derived from the input pixels.
///
/// SipHash over dimensions and raw pixel data, so re-running on the
/// same image reproduces the id and two different images (almost
/// surely) do not collide.
fn network_id(gray: &GrayImage) -> String {
    let mut hasher = SipHasher13::new();
    hasher.write_u32(gray.width());
    hasher.write_u32(gray.height());
    hasher.write(gray.as_raw());
    format!("network_{:016x}", hasher.finish())
}
