//! Raster decoding for JPEG and PNG sources.

use std::io::Cursor;

use image::ImageReader;

use super::{DecodeError, DecodedImage, ImageFormat};

/// Decode JPEG or PNG bytes into an RGBA bitmap.
///
/// The format is sniffed from the bytes themselves rather than trusted from
/// the caller's MIME type. Alpha is preserved when present. EXIF orientation
/// is not applied.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a recognized image.
/// Returns `DecodeError::CorruptedFile` if the image is truncated or damaged.
/// Returns `DecodeError::EmptyImage` if the image has zero width or height.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if sniff_format(bytes).is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let has_alpha = img.color().has_alpha();
    let decoded = DecodedImage::from_rgba_image(img.into_rgba8(), has_alpha);

    if decoded.is_empty() {
        return Err(DecodeError::EmptyImage);
    }

    log::debug!(
        "decoded {}x{} image (alpha: {})",
        decoded.width,
        decoded.height,
        decoded.has_alpha
    );

    Ok(decoded)
}

/// Identify which supported format the bytes are in, if any.
pub fn sniff_format(bytes: &[u8]) -> Option<ImageFormat> {
    match image::guess_format(bytes).ok()? {
        image::ImageFormat::Jpeg => Some(ImageFormat::Jpeg),
        image::ImageFormat::Png => Some(ImageFormat::Png),
        _ => None,
    }
}
