//! The stateful compressor exposed to the presentation layer.
//!
//! `JsCompressor` wraps a core [`Session`]. Every change that needs a run
//! queues a request; the page calls `process_next()` (or `process_all()`)
//! to run them in order. Runs whose generation has been superseded are
//! discarded by the session, so the page can drain the queue without caring
//! which requests are still current.
//!
//! # Example
//!
//! ```typescript
//! const compressor = new JsCompressor({ defaultParams: { quality: 0.8 } });
//! compressor.select_file(bytes, file.type, file.name);
//! compressor.set_max_dimension(1200);
//! compressor.process_all();
//! const result = compressor.result();
//! ```

use std::collections::VecDeque;

use futures::FutureExt;
use squish_core::format::{format_bytes, quality_percent};
use squish_core::session::{Commit, CompressionRequest, FileCandidate, Session, SessionError};
use squish_core::{ImageCodec, SessionConfig};
use wasm_bindgen::prelude::*;

use crate::types::{JsCompressedResult, JsDownload};

#[cfg(target_arch = "wasm32")]
type Previews = crate::previews::ObjectUrlPreviews;
#[cfg(not(target_arch = "wasm32"))]
type Previews = squish_core::DataUrlPreviews;

/// Single-file compression session for JavaScript.
///
/// `process_next` runs decode, resample and encode to completion on the
/// calling thread. Hosts that expect large files should run the stateless
/// [`crate::compress_image`] in a Web Worker instead of calling this from
/// the page's main thread.
#[wasm_bindgen]
pub struct JsCompressor {
    session: Session<ImageCodec, Previews>,
    queue: VecDeque<CompressionRequest>,
}

#[wasm_bindgen]
impl JsCompressor {
    /// Create a compressor. `options` is an optional `SessionConfig`-shaped object.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<JsCompressor, JsValue> {
        let config = if options.is_undefined() || options.is_null() {
            SessionConfig::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        Ok(Self::from_config(config))
    }

    /// Select a file. Unsupported types throw and clear the selection.
    pub fn select_file(
        &mut self,
        bytes: Vec<u8>,
        mime_type: String,
        file_name: String,
    ) -> Result<(), JsValue> {
        self.try_select(bytes, mime_type, file_name)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn set_quality(&mut self, quality: f32) {
        if let Some(request) = self.session.set_quality(quality) {
            self.queue.push_back(request);
        }
    }

    pub fn set_max_dimension(&mut self, max_dimension: u32) {
        if let Some(request) = self.session.set_max_dimension(max_dimension) {
            self.queue.push_back(request);
        }
    }

    /// Whether queued runs are waiting for `process_next`.
    #[wasm_bindgen(getter)]
    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Run the oldest queued request.
    ///
    /// Returns `"applied"`, `"failed"` or `"stale"`, or `undefined` when the
    /// queue is empty.
    pub fn process_next(&mut self) -> Option<String> {
        let request = self.queue.pop_front()?;
        let generation = request.generation;
        let commit = match self.session.process(request).now_or_never() {
            Some(commit) => commit,
            None => {
                log::error!("run {} did not complete synchronously", generation);
                return None;
            }
        };
        Some(commit_label(&commit).to_string())
    }

    /// Drain the queue. Returns how many runs were committed (not stale).
    pub fn process_all(&mut self) -> u32 {
        let mut committed = 0;
        while let Some(label) = self.process_next() {
            if label != "stale" {
                committed += 1;
            }
        }
        committed
    }

    /// Drop the selection, its previews and any queued runs.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.session.clear();
    }

    pub fn download(&self) -> Option<JsDownload> {
        self.session.download().map(JsDownload::from)
    }

    pub fn result(&self) -> Option<JsCompressedResult> {
        self.session.result().map(JsCompressedResult::from_result)
    }

    #[wasm_bindgen(getter)]
    pub fn is_processing(&self) -> bool {
        self.session.is_processing()
    }

    #[wasm_bindgen(getter)]
    pub fn has_file(&self) -> bool {
        self.session.source().is_some()
    }

    /// Current error or warning text.
    #[wasm_bindgen(getter)]
    pub fn message(&self) -> Option<String> {
        self.session.message().map(|m| m.text().to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn is_warning(&self) -> bool {
        self.session.message().is_some_and(|m| m.is_warning())
    }

    /// Whether the quality slider applies to the selected file.
    #[wasm_bindgen(getter)]
    pub fn show_quality_control(&self) -> bool {
        self.session.quality_control_visible()
    }

    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> f32 {
        self.session.params().quality
    }

    /// Quality as shown next to the slider, e.g. "70%".
    #[wasm_bindgen(getter)]
    pub fn quality_label(&self) -> String {
        format!("{}%", quality_percent(self.session.params().quality))
    }

    #[wasm_bindgen(getter)]
    pub fn max_dimension(&self) -> u32 {
        self.session.params().max_dimension
    }

    #[wasm_bindgen(getter)]
    pub fn original_preview_url(&self) -> Option<String> {
        self.session
            .original_preview()
            .map(|p| p.handle.url().to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn original_mime_type(&self) -> Option<String> {
        self.session.original_preview().map(|p| p.mime_type.clone())
    }

    #[wasm_bindgen(getter)]
    pub fn original_size_label(&self) -> Option<String> {
        self.session
            .original_preview()
            .map(|p| format_bytes(p.byte_size))
    }

    /// e.g. "42.5% smaller", once a result exists.
    #[wasm_bindgen(getter)]
    pub fn savings_label(&self) -> Option<String> {
        self.session.savings()
    }
}

impl JsCompressor {
    pub(crate) fn from_config(config: SessionConfig) -> Self {
        Self {
            session: Session::with_config(Previews::default(), config),
            queue: VecDeque::new(),
        }
    }

    pub(crate) fn try_select(
        &mut self,
        bytes: Vec<u8>,
        mime_type: String,
        file_name: String,
    ) -> Result<(), SessionError> {
        let result = self
            .session
            .select_file(FileCandidate::new(bytes, mime_type, file_name));
        match result {
            Ok(request) => {
                self.queue.push_back(request);
                Ok(())
            }
            Err(err) => {
                self.queue.clear();
                Err(err)
            }
        }
    }
}

fn commit_label(commit: &Commit) -> &'static str {
    match commit {
        Commit::Applied => "applied",
        Commit::Failed(_) => "failed",
        Commit::Stale => "stale",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::jpeg::JpegEncoder;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, 90)
            .write_image(
                &vec![140u8; (width * height * 3) as usize],
                width,
                height,
                ExtendedColorType::Rgb8,
            )
            .unwrap();
        bytes
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes)
            .write_image(
                &vec![90u8; (width * height * 4) as usize],
                width,
                height,
                ExtendedColorType::Rgba8,
            )
            .unwrap();
        bytes
    }

    fn compressor() -> JsCompressor {
        JsCompressor::from_config(SessionConfig::default())
    }

    #[test]
    fn test_select_and_process() {
        let mut c = compressor();
        c.try_select(jpeg_bytes(500, 2000), "image/jpeg".into(), "tall.jpg".into())
            .unwrap();
        c.set_max_dimension(1000);
        assert!(c.has_pending());
        assert!(c.is_processing());

        assert_eq!(c.process_all(), 1);
        assert!(!c.has_pending());
        assert!(!c.is_processing());

        let result = c.result().unwrap();
        assert_eq!((result.width(), result.height()), (250, 1000));
        assert!(result.preview_url().starts_with("data:image/jpeg;base64,"));
        assert!(c.savings_label().is_some());
    }

    #[test]
    fn test_process_next_reports_stale() {
        let mut c = compressor();
        c.try_select(jpeg_bytes(32, 32), "image/jpeg".into(), "a.jpg".into())
            .unwrap();
        c.set_quality(0.4);

        assert_eq!(c.process_next().as_deref(), Some("stale"));
        assert_eq!(c.process_next().as_deref(), Some("applied"));
        assert_eq!(c.process_next(), None);
    }

    #[test]
    fn test_reject_unsupported() {
        let mut c = compressor();
        let err = c
            .try_select(vec![0; 8], "image/gif".into(), "a.gif".into())
            .unwrap_err();
        assert!(matches!(err, SessionError::UnsupportedFormat { .. }));
        assert!(!c.has_file());
        assert!(!c.has_pending());
        assert_eq!(
            c.message().as_deref(),
            Some("Only JPG/JPEG and PNG image files are supported.")
        );
        assert!(!c.is_warning());
    }

    #[test]
    fn test_png_controls_and_download() {
        let mut c = compressor();
        c.try_select(png_bytes(20, 20), "image/png".into(), "photo.png".into())
            .unwrap();
        assert!(!c.show_quality_control());
        assert_eq!(c.original_mime_type().as_deref(), Some("image/png"));
        assert!(c.original_size_label().is_some());
        c.process_all();

        let download = c.download().unwrap();
        assert_eq!(download.file_name(), "compressed-photo.png");
        assert_eq!(download.extension(), "png");
    }

    #[test]
    fn test_failure_message() {
        let mut c = compressor();
        c.try_select(b"garbage".to_vec(), "image/png".into(), "x.png".into())
            .unwrap();
        assert_eq!(c.process_all(), 1);
        assert!(c.result().is_none());
        assert_eq!(
            c.message().as_deref(),
            Some("Invalid or unsupported image format")
        );
    }

    #[test]
    fn test_clear_drops_queue() {
        let mut c = compressor();
        c.try_select(jpeg_bytes(16, 16), "image/jpeg".into(), "a.jpg".into())
            .unwrap();
        c.clear();

        assert!(!c.has_pending());
        assert!(!c.has_file());
        assert!(c.original_preview_url().is_none());
        assert!(c.download().is_none());
    }

    #[test]
    fn test_quality_label() {
        let mut c = compressor();
        assert_eq!(c.quality_label(), "70%");
        c.set_quality(0.85);
        assert_eq!(c.quality_label(), "85%");
        assert_eq!(c.max_dimension(), 1600);
    }
}
