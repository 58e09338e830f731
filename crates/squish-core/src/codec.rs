//! The decode/resample/encode capability the pipeline depends on.
//!
//! [`Codec`] is the seam between the compression policy and whatever actually
//! touches pixels. [`ImageCodec`] is the production implementation on top of
//! the `image` crate; tests substitute their own to inject failures.

use crate::decode::{self, DecodeError, DecodedImage, FilterType, ImageFormat};
use crate::encode::{self, EncodeError};

/// Pixel-level operations used by [`crate::pipeline::compress`].
pub trait Codec: Send + Sync {
    /// Decode raw file bytes into a bitmap.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError>;

    /// Resample a bitmap to exact dimensions with a smoothing filter.
    fn resize(
        &self,
        image: &DecodedImage,
        width: u32,
        height: u32,
    ) -> Result<DecodedImage, DecodeError>;

    /// Encode a bitmap. `quality` is only honoured by lossy formats.
    fn encode(
        &self,
        image: &DecodedImage,
        format: ImageFormat,
        quality: Option<f32>,
    ) -> Result<Vec<u8>, EncodeError>;
}

/// [`Codec`] backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec {
    pub filter: FilterType,
}

impl ImageCodec {
    pub fn new(filter: FilterType) -> Self {
        Self { filter }
    }
}

/// Quality applied when a lossy encode is requested without one.
const DEFAULT_JPEG_QUALITY: f32 = 0.92;

impl Codec for ImageCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        decode::decode_image(bytes)
    }

    fn resize(
        &self,
        image: &DecodedImage,
        width: u32,
        height: u32,
    ) -> Result<DecodedImage, DecodeError> {
        decode::resize(image, width, height, self.filter)
    }

    fn encode(
        &self,
        image: &DecodedImage,
        format: ImageFormat,
        quality: Option<f32>,
    ) -> Result<Vec<u8>, EncodeError> {
        match format {
            ImageFormat::Jpeg => encode::encode_jpeg(
                &image.pixels,
                image.width,
                image.height,
                encode::jpeg_quality(quality.unwrap_or(DEFAULT_JPEG_QUALITY)),
            ),
            ImageFormat::Png => {
                encode::encode_png(&image.pixels, image.width, image.height, image.has_alpha)
            }
        }
    }
}
