//! Downscaling for the compression pipeline.
//!
//! Only the longer side is constrained. Images that already fit are never
//! upscaled. All functions return new `DecodedImage` instances without
//! modifying the input.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions, preserving alpha.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if either target dimension is zero.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgba_image = image
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbaImage".to_string()))?;

    let resized = image::imageops::resize(&rgba_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgba_image(resized, image.has_alpha))
}

/// Resize an image so its longer side is at most `max_dimension`.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if `max_dimension` is zero.
pub fn resize_to_fit(
    image: &DecodedImage,
    max_dimension: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_dimension == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    let (width, height) = target_dimensions(image.width, image.height, max_dimension);
    resize(image, width, height, filter)
}

/// Compute output dimensions for a source of `width x height`.
///
/// When the longer side exceeds `max_dimension` both sides are multiplied by
/// `max_dimension / max_side` and rounded; otherwise the input dimensions are
/// returned unchanged. Non-empty inputs never produce a zero-sized side.
pub fn target_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let max_side = width.max(height);
    if max_side <= max_dimension {
        return (width, height);
    }

    let scale = max_dimension as f64 / max_side as f64;
    let new_width = (width as f64 * scale).round() as u32;
    let new_height = (height as f64 * scale).round() as u32;
    (new_width.max(1), new_height.max(1))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
