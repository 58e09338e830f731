//! Image encoding for Squish.
//!
//! This module provides functionality for:
//! - Encoding RGBA bitmaps to JPEG with a quality factor (lossy)
//! - Encoding RGBA bitmaps to PNG (lossless, alpha preserved)
//!
//! Both encoders take the RGBA buffers produced by [`crate::decode`], so a
//! bitmap can go straight from resampling to encoding.
//!
//! # Examples
//!
//! ```ignore
//! use squish_core::encode::{encode_jpeg, jpeg_quality};
//!
//! let pixels = vec![128u8; 100 * 100 * 4]; // Gray image
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, jpeg_quality(0.7)).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod error;
mod jpeg;
mod png;

pub use error::EncodeError;
pub use jpeg::{encode_jpeg, jpeg_quality};
pub use png::encode_png;
