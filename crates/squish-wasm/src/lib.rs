//! Squish WASM - WebAssembly bindings for Squish
//!
//! This crate exposes the squish-core compression session to the browser
//! page, which only renders controls and previews.
//!
//! # Module Structure
//!
//! - `compressor` - `JsCompressor`, the stateful single-file session
//! - `types` - WASM-compatible wrapper types for results and downloads
//! - `previews` - Object-URL preview handles
//! - `logger` - `log` backend writing to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCompressor } from '@squish/wasm';
//!
//! await init();
//!
//! const compressor = new JsCompressor();
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! compressor.select_file(bytes, file.type, file.name);
//! compressor.process_all();
//! console.log(compressor.result()?.size_label);
//! ```

use futures::FutureExt;
use squish_core::session::SessionError;
use squish_core::{compress, CompressionParams, ImageCodec, ImageFormat, SourceImage};
use wasm_bindgen::prelude::*;

mod compressor;
mod logger;
mod previews;
mod types;

pub use compressor::JsCompressor;
pub use previews::ObjectUrlPreviews;
pub use types::{JsCompressedImage, JsCompressedResult, JsDownload};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::init(log::LevelFilter::Info);
}

/// Change the console log level ("error", "warn", "info", "debug", "trace", "off").
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    logger::init(logger::parse_level(level));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Format a byte count for display, e.g. `1536` -> `"1.5 KB"`.
#[wasm_bindgen]
pub fn format_bytes(bytes: f64) -> String {
    squish_core::format_bytes(bytes.max(0.0) as u64)
}

/// Whether a MIME type can be selected.
#[wasm_bindgen]
pub fn is_supported_type(mime_type: &str) -> bool {
    ImageFormat::from_mime(mime_type).is_some()
}

/// Compress a single image without a session.
///
/// Useful from a Web Worker that manages its own state. Parameters are
/// snapped to the usual control ranges.
#[wasm_bindgen]
pub fn compress_image(
    bytes: Vec<u8>,
    mime_type: &str,
    quality: f32,
    max_dimension: u32,
) -> Result<JsCompressedImage, JsValue> {
    compress_bytes(bytes, mime_type, quality, max_dimension).map_err(|e| JsValue::from_str(&e))
}

fn compress_bytes(
    bytes: Vec<u8>,
    mime_type: &str,
    quality: f32,
    max_dimension: u32,
) -> Result<JsCompressedImage, String> {
    let format = ImageFormat::from_mime(mime_type).ok_or_else(|| {
        SessionError::UnsupportedFormat {
            mime_type: mime_type.to_string(),
        }
        .to_string()
    })?;
    let source = SourceImage {
        bytes,
        mime_type: mime_type.to_string(),
        format,
        file_name: String::new(),
    };
    let params = CompressionParams::new(quality, max_dimension);

    let outcome = compress(&ImageCodec::default(), &source, params)
        .now_or_never()
        .ok_or_else(|| "Compression did not complete synchronously".to_string())?;

    outcome
        .map(JsCompressedImage::from)
        .map_err(|e| e.user_message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageEncoder;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_format_bytes_binding() {
        assert_eq!(format_bytes(0.0), "0 B");
        assert_eq!(format_bytes(1536.0), "1.5 KB");
        assert_eq!(format_bytes(-5.0), "0 B");
    }

    #[test]
    fn test_is_supported_type() {
        assert!(is_supported_type("image/jpeg"));
        assert!(is_supported_type("image/png"));
        assert!(!is_supported_type("image/gif"));
    }

    #[test]
    fn test_compress_bytes_rejects_unsupported() {
        let err = compress_bytes(vec![0; 4], "image/webp", 0.7, 1600)
            .err()
            .unwrap();
        assert_eq!(err, "Only JPG/JPEG and PNG image files are supported.");
    }

    #[test]
    fn test_compress_bytes_png() {
        let mut png = Vec::new();
        image::codecs::png::PngEncoder::new(&mut png)
            .write_image(&[10u8; 3000 * 4 * 4], 3000, 4, image::ExtendedColorType::Rgba8)
            .unwrap();

        let out = compress_bytes(png, "image/png", 0.7, 600).unwrap();
        assert_eq!((out.width(), out.height()), (600, 1));
        assert_eq!(out.mime_type(), "image/png");
    }
}
