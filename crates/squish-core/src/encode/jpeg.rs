//! Lossy JPEG encoding.
//!
//! Uses the `image` crate's baseline JPEG encoder. Alpha is discarded; JPEG
//! sources decode fully opaque, so nothing visible is lost.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::error::check_rgba;
use super::EncodeError;

/// Map a quality factor in `[0.0, 1.0]` onto the encoder's 1-100 scale.
///
/// Out-of-range and non-finite factors are clamped, so `0.7` becomes `70`
/// and `1.5` becomes `100`.
pub fn jpeg_quality(factor: f32) -> u8 {
    ((factor * 100.0).round() as i32).clamp(1, 100) as u8
}

/// Encode RGBA pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Returns
///
/// JPEG-encoded bytes on success, or an error if encoding fails.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    check_rgba(pixels, width, height)?;

    let rgb: Vec<u8> = pixels
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Every factor in the control domain maps onto 20..=100.
        #[test]
        fn prop_control_domain_quality(step in 0u32..=16) {
            let factor = 0.2 + step as f32 * 0.05;
            let q = jpeg_quality(factor);
            prop_assert!((20..=100).contains(&q), "factor {} -> {}", factor, q);
        }

        /// Property: Encoding always produces valid JPEG when given valid input.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            width in 1u32..=40,
            height in 1u32..=40,
            quality in 1u8..=100,
        ) {
            let pixels = vec![128u8; (width * height * 4) as usize];

            let jpeg = encode_jpeg(&pixels, width, height, quality).unwrap();
            prop_assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
            let len = jpeg.len();
            prop_assert_eq!(&jpeg[len - 2..], &[0xFF, 0xD9]);
        }
    }
}
