//! Preview handles for original and compressed bytes.
//!
//! A [`PreviewHandle`] is a URL the presentation layer can display. Handles
//! are not `Clone`: the only way to give one up is to move it into
//! [`PreviewStore::release`], so each handle is released at most once. The
//! session owns every live handle and releases it when it is superseded or
//! cleared.

use data_encoding::BASE64;

/// An owned, displayable reference to encoded image bytes.
#[derive(Debug, PartialEq, Eq)]
pub struct PreviewHandle {
    url: String,
}

impl PreviewHandle {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Consume the handle, returning the URL for the store to revoke.
    pub fn into_url(self) -> String {
        self.url
    }
}

/// Creates and releases preview handles.
pub trait PreviewStore {
    fn create(&self, bytes: &[u8], mime_type: &str) -> PreviewHandle;

    fn release(&self, handle: PreviewHandle);
}

impl<T: PreviewStore + ?Sized> PreviewStore for &T {
    fn create(&self, bytes: &[u8], mime_type: &str) -> PreviewHandle {
        (**self).create(bytes, mime_type)
    }

    fn release(&self, handle: PreviewHandle) {
        (**self).release(handle)
    }
}

/// Self-contained `data:` URLs. Releasing simply drops the string.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUrlPreviews;

impl PreviewStore for DataUrlPreviews {
    fn create(&self, bytes: &[u8], mime_type: &str) -> PreviewHandle {
        PreviewHandle::new(data_url(bytes, mime_type))
    }

    fn release(&self, handle: PreviewHandle) {
        drop(handle);
    }
}

/// Build a base64 `data:` URL.
pub fn data_url(bytes: &[u8], mime_type: &str) -> String {
    format!("data:{};base64,{}", mime_type, BASE64.encode(bytes))
}
