//! Image decoding and resampling for Squish.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG images into RGBA bitmaps
//! - Computing output dimensions under a max-dimension constraint
//! - Downscaling with smoothing filters
//!
//! # Architecture
//!
//! Decoding runs in-process on borrowed bytes, so there is no temporary
//! handle to release once it finishes. All operations are synchronous and
//! single-threaded; the pipeline wraps them in an async boundary.
//!
//! # Examples
//!
//! ```ignore
//! use squish_core::decode::{decode_image, resize_to_fit, FilterType};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! let smaller = resize_to_fit(&image, 1600, FilterType::Bicubic).unwrap();
//! ```

mod loader;
mod resize;
mod types;

pub use loader::{decode_image, sniff_format};
pub use resize::{resize, resize_to_fit, target_dimensions};
pub use types::{DecodeError, DecodedImage, FilterType, ImageFormat};
