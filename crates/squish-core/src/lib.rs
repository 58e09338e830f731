//! Squish Core - client-side image compression
//!
//! This crate provides the compression pipeline behind Squish: decode a JPEG
//! or PNG, optionally downscale it, re-encode it in the same format and
//! report the result. A [`Session`] drives the pipeline for one selected
//! file at a time and makes sure only the newest run's output is shown.

pub mod codec;
pub mod config;
pub mod decode;
pub mod encode;
pub mod format;
pub mod pipeline;
pub mod preview;
pub mod session;

#[cfg(test)]
mod test_helpers;

pub use codec::{Codec, ImageCodec};
pub use config::SessionConfig;
pub use decode::{DecodeError, DecodedImage, FilterType, ImageFormat};
pub use encode::EncodeError;
pub use format::{format_bytes, format_savings, quality_percent, savings_percent};
pub use pipeline::{compress, CompressedImage, CompressionError, CompressionParams, SourceImage};
pub use preview::{DataUrlPreviews, PreviewHandle, PreviewStore};
pub use session::{
    Commit, CompressedResult, CompressionRequest, Download, FileCandidate, Session,
    SessionError, SessionMessage,
};
