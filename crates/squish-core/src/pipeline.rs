//! The compression pipeline: decode, downscale, re-encode.
//!
//! [`compress`] is a pure function of its inputs. It never touches session
//! state and never allocates preview handles, so a run whose result is later
//! discarded leaves nothing behind.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::Codec;
use crate::decode::{target_dimensions, DecodeError, ImageFormat};
use crate::encode::EncodeError;

/// Shown when a failure carries no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Unable to compress this image. Please try another file.";

pub const MIN_QUALITY: f32 = 0.2;
pub const MAX_QUALITY: f32 = 1.0;
pub const QUALITY_STEP: f32 = 0.05;
pub const DEFAULT_QUALITY: f32 = 0.7;

pub const MIN_MAX_DIMENSION: u32 = 600;
pub const MAX_MAX_DIMENSION: u32 = 2400;
pub const MAX_DIMENSION_STEP: u32 = 50;
pub const DEFAULT_MAX_DIMENSION: u32 = 1600;

/// Failure of a single compression run.
#[derive(Debug, Error)]
pub enum CompressionError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl CompressionError {
    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

/// An accepted input file. Immutable once selected.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub format: ImageFormat,
    pub file_name: String,
}

impl SourceImage {
    pub fn byte_size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// User-controlled compression settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompressionParams {
    /// Lossy quality factor (0.2 to 1.0, step 0.05). Ignored for PNG.
    pub quality: f32,
    /// Limit for the longer side in pixels (600 to 2400, step 50).
    pub max_dimension: u32,
}

impl Default for CompressionParams {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

impl CompressionParams {
    pub fn new(quality: f32, max_dimension: u32) -> Self {
        Self::default()
            .with_quality(quality)
            .with_max_dimension(max_dimension)
    }

    /// Set quality, snapped to the nearest step inside the control range.
    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = snap_quality(quality);
        self
    }

    /// Set the max dimension, snapped to the nearest step inside the control range.
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = snap_max_dimension(max_dimension);
        self
    }
}

fn snap_quality(quality: f32) -> f32 {
    if !quality.is_finite() {
        return DEFAULT_QUALITY;
    }
    let clamped = quality.clamp(MIN_QUALITY, MAX_QUALITY);
    let steps = ((clamped - MIN_QUALITY) / QUALITY_STEP).round();
    // Round to 2 places so 0.2 + 10 * 0.05 compares equal to 0.7
    let snapped = MIN_QUALITY + steps * QUALITY_STEP;
    ((snapped * 100.0).round() / 100.0).min(MAX_QUALITY)
}

fn snap_max_dimension(max_dimension: u32) -> u32 {
    let clamped = max_dimension.clamp(MIN_MAX_DIMENSION, MAX_MAX_DIMENSION);
    let offset = clamped - MIN_MAX_DIMENSION;
    let steps = (offset + MAX_DIMENSION_STEP / 2) / MAX_DIMENSION_STEP;
    (MIN_MAX_DIMENSION + steps * MAX_DIMENSION_STEP).min(MAX_MAX_DIMENSION)
}

/// Encoded output of one run. Always in the source's format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl CompressedImage {
    pub fn byte_size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Run the pipeline on `source` with `params`.
///
/// The longer side is limited to `params.max_dimension` (never upscaled).
/// JPEG output applies `params.quality`; PNG output is lossless and ignores
/// it. The output format always equals `source.format`.
pub async fn compress<C: Codec + ?Sized>(
    codec: &C,
    source: &SourceImage,
    params: CompressionParams,
) -> Result<CompressedImage, CompressionError> {
    let decoded = codec.decode(&source.bytes)?;

    let (width, height) = target_dimensions(decoded.width, decoded.height, params.max_dimension);
    let resized = if (width, height) == (decoded.width, decoded.height) {
        decoded
    } else {
        codec.resize(&decoded, width, height)?
    };

    let quality = source.format.is_lossy().then_some(params.quality);
    let bytes = codec.encode(&resized, source.format, quality)?;

    log::debug!(
        "compressed {} ({} bytes) to {}x{} {} ({} bytes)",
        source.file_name,
        source.byte_size(),
        width,
        height,
        source.format.mime_type(),
        bytes.len()
    );

    Ok(CompressedImage {
        bytes,
        format: source.format,
        width,
        height,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
