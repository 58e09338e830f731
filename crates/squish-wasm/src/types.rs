//! WASM-compatible wrapper types for compression output.
//!
//! These types copy what JavaScript needs out of the core session so that
//! the session keeps sole ownership of its preview handles. Byte sizes are
//! exposed as `f64` because `u64` would surface as a `BigInt`.

use squish_core::format_bytes;
use squish_core::session::{CompressedResult, Download};
use squish_core::CompressedImage;
use wasm_bindgen::prelude::*;

/// Snapshot of the current compressed result.
#[wasm_bindgen]
pub struct JsCompressedResult {
    width: u32,
    height: u32,
    mime_type: String,
    preview_url: String,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl JsCompressedResult {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    /// URL to display the compressed image. Owned by the compressor; do not revoke it.
    #[wasm_bindgen(getter)]
    pub fn preview_url(&self) -> String {
        self.preview_url.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_size(&self) -> f64 {
        self.bytes.len() as f64
    }

    /// Byte size formatted for display, e.g. "245 KB".
    #[wasm_bindgen(getter)]
    pub fn size_label(&self) -> String {
        format_bytes(self.bytes.len() as u64)
    }

    /// Returns the encoded bytes as Uint8Array (copied).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

impl JsCompressedResult {
    pub(crate) fn from_result(result: &CompressedResult) -> Self {
        Self {
            width: result.width(),
            height: result.height(),
            mime_type: result.mime_type().to_string(),
            preview_url: result.preview_url().to_string(),
            bytes: result.bytes().to_vec(),
        }
    }
}

/// Output of the stateless one-shot [`crate::compress_image`].
#[wasm_bindgen]
pub struct JsCompressedImage {
    width: u32,
    height: u32,
    mime_type: String,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl JsCompressedImage {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_size(&self) -> f64 {
        self.bytes.len() as f64
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

impl From<CompressedImage> for JsCompressedImage {
    fn from(image: CompressedImage) -> Self {
        Self {
            width: image.width,
            height: image.height,
            mime_type: image.mime_type().to_string(),
            bytes: image.bytes,
        }
    }
}

/// File to hand to the browser's "save as" flow.
#[wasm_bindgen]
pub struct JsDownload {
    file_name: String,
    extension: String,
    mime_type: String,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl JsDownload {
    /// Suggested file name, e.g. "compressed-photo.png".
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.file_name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn extension(&self) -> String {
        self.extension.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

impl From<Download> for JsDownload {
    fn from(download: Download) -> Self {
        Self {
            file_name: download.file_name,
            extension: download.extension.to_string(),
            mime_type: download.mime_type,
            bytes: download.bytes,
        }
    }
}
