//! Selection and session controller.
//!
//! [`Session`] owns the selected file, the current parameters, the latest
//! compressed result and every preview handle. Recomputation is explicit:
//! each mutation that needs a new run returns a [`CompressionRequest`]
//! tagged with a generation id. The caller executes it whenever it likes and
//! reports back through [`Session::complete`], which only commits the outcome
//! if no newer request has been issued since. A slow run started with old
//! parameters therefore can never overwrite a newer result.
//!
//! # Examples
//!
//! ```ignore
//! let mut session = Session::new(ImageCodec::default(), DataUrlPreviews);
//! let request = session.select_file(candidate)?;
//! session.process(request).await;
//! if let Some(result) = session.result() {
//!     println!("{}x{}", result.width(), result.height());
//! }
//! ```

use std::sync::Arc;

use thiserror::Error;

use crate::codec::{Codec, ImageCodec};
use crate::config::SessionConfig;
use crate::decode::ImageFormat;
use crate::format::format_savings;
use crate::pipeline::{
    compress, CompressedImage, CompressionError, CompressionParams, SourceImage,
};
use crate::preview::{PreviewHandle, PreviewStore};

pub const LARGE_FILE_WARNING: &str = "Warning: Large file detected. Processing may take longer.";

/// Selection rejected by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Only JPG/JPEG and PNG image files are supported.")]
    UnsupportedFormat { mime_type: String },
}

/// A file offered by the picker or a drop.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub file_name: String,
}

impl FileCandidate {
    pub fn new(
        bytes: Vec<u8>,
        mime_type: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
            file_name: file_name.into(),
        }
    }

    pub fn byte_size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// User-facing status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMessage {
    /// Advisory only; processing continues.
    Warning(String),
    Error(String),
}

impl SessionMessage {
    pub fn text(&self) -> &str {
        match self {
            SessionMessage::Warning(text) | SessionMessage::Error(text) => text,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, SessionMessage::Warning(_))
    }
}

/// Preview of the selected file, before compression.
#[derive(Debug)]
pub struct OriginalPreview {
    pub handle: PreviewHandle,
    pub byte_size: u64,
    pub mime_type: String,
}

/// A committed pipeline output together with its preview handle.
#[derive(Debug)]
pub struct CompressedResult {
    pub image: CompressedImage,
    pub preview: PreviewHandle,
}

impl CompressedResult {
    pub fn bytes(&self) -> &[u8] {
        &self.image.bytes
    }

    pub fn preview_url(&self) -> &str {
        self.preview.url()
    }

    pub fn width(&self) -> u32 {
        self.image.width
    }

    pub fn height(&self) -> u32 {
        self.image.height
    }

    pub fn byte_size(&self) -> u64 {
        self.image.byte_size()
    }

    pub fn mime_type(&self) -> &'static str {
        self.image.mime_type()
    }
}

/// One pipeline invocation for a (file, params) snapshot.
#[derive(Debug, Clone)]
pub struct CompressionRequest {
    pub generation: u64,
    pub source: Arc<SourceImage>,
    pub params: CompressionParams,
}

/// What [`Session::complete`] did with an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit {
    /// The result is now the session's current result.
    Applied,
    /// The run failed; the message is now the session's error.
    Failed(String),
    /// A newer request was issued; the outcome was dropped.
    Stale,
}

/// Saved-file payload for the "save as" collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub extension: &'static str,
}

/// Everything the presentation layer renders.
#[derive(Debug, Default)]
pub struct SessionState {
    pub source: Option<Arc<SourceImage>>,
    pub original_preview: Option<OriginalPreview>,
    pub params: CompressionParams,
    pub result: Option<CompressedResult>,
    pub processing: bool,
    pub message: Option<SessionMessage>,
}

pub struct Session<C: Codec, P: PreviewStore> {
    codec: C,
    previews: P,
    config: SessionConfig,
    state: SessionState,
    latest_generation: u64,
}

impl<P: PreviewStore> Session<ImageCodec, P> {
    /// Session on the `image` crate codec, configured from `config`.
    pub fn with_config(previews: P, config: SessionConfig) -> Self {
        Session::with_codec(ImageCodec::new(config.filter), previews, config)
    }
}

impl<C: Codec, P: PreviewStore> Session<C, P> {
    pub fn new(codec: C, previews: P) -> Self {
        Self::with_codec(codec, previews, SessionConfig::default())
    }

    pub fn with_codec(codec: C, previews: P, config: SessionConfig) -> Self {
        Self {
            codec,
            previews,
            config,
            state: SessionState {
                params: config.default_params,
                ..SessionState::default()
            },
            latest_generation: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn params(&self) -> CompressionParams {
        self.state.params
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.state.source.as_deref()
    }

    pub fn original_preview(&self) -> Option<&OriginalPreview> {
        self.state.original_preview.as_ref()
    }

    pub fn result(&self) -> Option<&CompressedResult> {
        self.state.result.as_ref()
    }

    pub fn message(&self) -> Option<&SessionMessage> {
        self.state.message.as_ref()
    }

    pub fn is_processing(&self) -> bool {
        self.state.processing
    }

    /// Quality only matters for lossy sources; PNG hides the control.
    pub fn quality_control_visible(&self) -> bool {
        self.source().is_some_and(|source| source.format.is_lossy())
    }

    /// Savings label for the current original/result pair.
    pub fn savings(&self) -> Option<String> {
        let source = self.source()?;
        let result = self.result()?;
        format_savings(source.byte_size(), result.byte_size())
    }

    /// Replace the selected file.
    ///
    /// Unsupported MIME types clear the current selection and set the error
    /// message. Accepted files replace the source, discard the previous
    /// result and return the request for the first run.
    pub fn select_file(
        &mut self,
        candidate: FileCandidate,
    ) -> Result<CompressionRequest, SessionError> {
        self.release_original_preview();
        self.release_result();

        let Some(format) = ImageFormat::from_mime(&candidate.mime_type) else {
            let err = SessionError::UnsupportedFormat {
                mime_type: candidate.mime_type,
            };
            log::warn!("rejected {}: {}", candidate.file_name, err);
            self.state.source = None;
            self.state.processing = false;
            self.state.message = Some(SessionMessage::Error(err.to_string()));
            // In-flight runs for the old file must not land
            self.latest_generation += 1;
            return Err(err);
        };

        self.state.message = if candidate.byte_size() > self.config.size_warning_bytes {
            Some(SessionMessage::Warning(LARGE_FILE_WARNING.to_string()))
        } else {
            None
        };

        let preview = self.previews.create(&candidate.bytes, &candidate.mime_type);
        self.state.original_preview = Some(OriginalPreview {
            handle: preview,
            byte_size: candidate.byte_size(),
            mime_type: candidate.mime_type.clone(),
        });
        let source = Arc::new(SourceImage {
            bytes: candidate.bytes,
            mime_type: candidate.mime_type,
            format,
            file_name: candidate.file_name,
        });
        self.state.source = Some(Arc::clone(&source));

        Ok(self.issue_request(source))
    }

    /// Change quality. Returns a request only if a file is selected and the
    /// snapped value actually changed.
    pub fn set_quality(&mut self, quality: f32) -> Option<CompressionRequest> {
        let params = self.state.params.with_quality(quality);
        self.update_params(params)
    }

    /// Change the max dimension. Same rules as [`Session::set_quality`].
    pub fn set_max_dimension(&mut self, max_dimension: u32) -> Option<CompressionRequest> {
        let params = self.state.params.with_max_dimension(max_dimension);
        self.update_params(params)
    }

    fn update_params(&mut self, params: CompressionParams) -> Option<CompressionRequest> {
        if params == self.state.params {
            return None;
        }
        self.state.params = params;
        let source = self.state.source.clone()?;
        Some(self.issue_request(source))
    }

    fn issue_request(&mut self, source: Arc<SourceImage>) -> CompressionRequest {
        self.release_result();
        self.latest_generation += 1;
        self.state.processing = true;
        if matches!(self.state.message, Some(SessionMessage::Error(_))) {
            self.state.message = None;
        }

        log::debug!(
            "issuing run {} for {} (quality {}, max {}px)",
            self.latest_generation,
            source.file_name,
            self.state.params.quality,
            self.state.params.max_dimension
        );

        CompressionRequest {
            generation: self.latest_generation,
            source,
            params: self.state.params,
        }
    }

    /// Run the pipeline for `request` without touching session state.
    pub async fn execute(
        &self,
        request: &CompressionRequest,
    ) -> Result<CompressedImage, CompressionError> {
        compress(&self.codec, &request.source, request.params).await
    }

    /// Commit the outcome of a run if it belongs to the latest request.
    pub fn complete(
        &mut self,
        generation: u64,
        outcome: Result<CompressedImage, CompressionError>,
    ) -> Commit {
        if generation != self.latest_generation || self.state.source.is_none() {
            log::warn!(
                "discarding stale run {} (latest is {})",
                generation,
                self.latest_generation
            );
            return Commit::Stale;
        }

        self.state.processing = false;
        self.release_result();

        match outcome {
            Ok(image) => {
                let preview = self.previews.create(&image.bytes, image.mime_type());
                self.state.result = Some(CompressedResult { image, preview });
                if matches!(self.state.message, Some(SessionMessage::Error(_))) {
                    self.state.message = None;
                }
                Commit::Applied
            }
            Err(err) => {
                let message = err.user_message();
                log::warn!("run {} failed: {}", generation, message);
                self.state.message = Some(SessionMessage::Error(message.clone()));
                Commit::Failed(message)
            }
        }
    }

    /// [`Session::execute`] followed by [`Session::complete`].
    pub async fn process(&mut self, request: CompressionRequest) -> Commit {
        let outcome = self.execute(&request).await;
        self.complete(request.generation, outcome)
    }

    /// Drop the selection and every derived value. Parameters are kept.
    pub fn clear(&mut self) {
        self.release_original_preview();
        self.release_result();
        self.state.source = None;
        self.state.message = None;
        self.state.processing = false;
        self.latest_generation += 1;
    }

    /// The compressed bytes under a `compressed-<name>.<ext>` file name.
    ///
    /// The extension follows the original MIME type, not the output's.
    pub fn download(&self) -> Option<Download> {
        let source = self.source()?;
        let result = self.result()?;
        let extension = extension_for_mime(&source.mime_type);

        Some(Download {
            file_name: format!(
                "compressed-{}.{}",
                strip_extension(&source.file_name),
                extension
            ),
            bytes: result.bytes().to_vec(),
            mime_type: result.mime_type().to_string(),
            extension,
        })
    }

    fn release_original_preview(&mut self) {
        if let Some(preview) = self.state.original_preview.take() {
            self.previews.release(preview.handle);
        }
    }

    fn release_result(&mut self) {
        if let Some(result) = self.state.result.take() {
            self.previews.release(result.preview);
        }
    }
}

impl<C: Codec, P: PreviewStore> Drop for Session<C, P> {
    fn drop(&mut self) {
        self.release_original_preview();
        self.release_result();
    }
}

/// Download extension for an original MIME type; unknown types get `dat`.
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    ImageFormat::from_mime(mime_type)
        .map(ImageFormat::extension)
        .unwrap_or("dat")
}

/// Remove the last `.ext` suffix from a file name, if there is one.
pub fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) if idx + 1 < file_name.len() && !file_name[idx + 1..].contains('/') => {
            &file_name[..idx]
        }
        _ => file_name,
    }
}
