//! Session configuration.
//!
//! Nothing is read from disk or the environment. The host builds a
//! [`SessionConfig`] (from JavaScript this arrives as a plain object through
//! `serde-wasm-bindgen`); missing fields fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::decode::FilterType;
use crate::pipeline::CompressionParams;

/// Files above this size are accepted with a warning (10 MiB).
pub const SIZE_WARNING_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Initial quality and max dimension.
    pub default_params: CompressionParams,
    /// Byte size above which a selection gets the large-file warning.
    pub size_warning_bytes: u64,
    /// Resampling filter used when downscaling.
    pub filter: FilterType,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_params: CompressionParams::default(),
            size_warning_bytes: SIZE_WARNING_BYTES,
            filter: FilterType::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::value::{Error as ValueError, MapDeserializer};

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.size_warning_bytes, 10_485_760);
        assert_eq!(config.filter, FilterType::Bicubic);
        assert_eq!(config.default_params, CompressionParams::default());
    }

    #[test]
    fn test_deserialize_partial() {
        let fields =
            MapDeserializer::<_, ValueError>::new([("sizeWarningBytes", 2048u64)].into_iter());
        let config = SessionConfig::deserialize(fields).unwrap();

        assert_eq!(config.size_warning_bytes, 2048);
        assert_eq!(config.default_params.max_dimension, 1600);
    }
}
