//! Image decoding and road-mask binarization.
//!
//! The first two pipeline steps: decode raw image bytes into a
//! single-channel grayscale image, then turn it into a binary
//! road/non-road mask. Roads photograph darker than their
//! surroundings, so the mask keeps road pixels at 0 and background
//! at 255.

use image::GrayImage;
use imageproc::contrast::adaptive_threshold;
use imageproc::distance_transform::Norm;
use imageproc::morphology::{close, open};

use crate::types::{ExtractionConfig, PipelineError};

/// Decode raw image bytes and convert to grayscale.
///
/// Supports PNG, JPEG, and BMP (whatever the `image` crate can
/// decode with the enabled features). RGB inputs are converted with
/// the standard luminance weights.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn decode_to_grayscale(bytes: &[u8]) -> Result<GrayImage, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_luma8())
}

/// Binarize a grayscale image into a road/non-road mask.
///
/// Three steps: Gaussian smoothing to suppress sensor noise, an
/// adaptive local-mean threshold, and a morphological closing/opening
/// pass with a 3x3 structuring element. The closing clears isolated
/// dark speckle; the opening restores thin light features (lane
/// markings) that the closing fattened.
///
/// The threshold window is `2 * threshold_block_radius + 1` pixels
/// square and must exceed `max_road_width`: a window narrower than
/// the road makes road interiors match their local mean and binarize
/// as background, which starves the width estimator of signal.
///
/// Output has the same dimensions as the input: 0 where road, 255
/// elsewhere.
#[must_use = "returns the binary road mask"]
pub fn binarize(gray: &GrayImage, config: &ExtractionConfig) -> GrayImage {
    let smoothed = if config.blur_sigma > 0.0 {
        imageproc::filter::gaussian_blur_f32(gray, config.blur_sigma)
    } else {
        gray.clone()
    };

    let mask = adaptive_threshold(&smoothed, config.threshold_block_radius.max(1), 0);

    // The mask is light-background/dark-road, so closing the light
    // regions removes dark speckle and opening refills light pin-holes
    // punched into road bodies by the threshold.
    let mask = close(&mask, Norm::LInf, 1);
    open(&mask, Norm::LInf, 1)
}
