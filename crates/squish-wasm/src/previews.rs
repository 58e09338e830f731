//! Browser-backed preview handles.
//!
//! Previews are `blob:` object URLs created with `URL.createObjectURL` and
//! revoked with `URL.revokeObjectURL` when the session releases them. If the
//! browser refuses to create one, a `data:` URL is used instead; those need
//! no revocation.

use squish_core::preview::{data_url, PreviewHandle, PreviewStore};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, Url};

/// [`PreviewStore`] over the browser's object-URL registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectUrlPreviews;

impl PreviewStore for ObjectUrlPreviews {
    fn create(&self, bytes: &[u8], mime_type: &str) -> PreviewHandle {
        match object_url(bytes, mime_type) {
            Ok(url) => PreviewHandle::new(url),
            Err(err) => {
                log::warn!("createObjectURL failed, using data URL: {:?}", err);
                PreviewHandle::new(data_url(bytes, mime_type))
            }
        }
    }

    fn release(&self, handle: PreviewHandle) {
        let url = handle.into_url();
        if !is_object_url(&url) {
            return;
        }
        if let Err(err) = Url::revoke_object_url(&url) {
            log::warn!("revokeObjectURL failed for {}: {:?}", url, err);
        }
    }
}

fn object_url(bytes: &[u8], mime_type: &str) -> Result<String, JsValue> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    Url::create_object_url_with_blob(&blob)
}

fn is_object_url(url: &str) -> bool {
    url.starts_with("blob:")
}


/// Browser tests for the object-URL registry.
///
/// These call into `web_sys` and only run on wasm32 targets via `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_create_and_revoke_object_url() {
        let store = ObjectUrlPreviews;
        let handle = store.create(&[0x89, b'P', b'N', b'G'], "image/png");
        assert!(handle.url().starts_with("blob:"));
        store.release(handle);
    }
}
