//! Concrete [`ConfigSource`](super::ConfigSource) implementations.
//!
//! Provides file-based sources (YAML, JSON, TOML) gated by feature flags
//! and the [`parse_config_str`] helper for format-specific deserialization.

pub mod file_source;

#[cfg(feature = "yaml")]
pub mod yaml;

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "toml")]
pub mod toml_source;

use sha2::{Digest, Sha256};

use crate::config::model::ServiceConfig;
use crate::error::PlugchainError;

/// Parse a config string based on file extension.
pub fn parse_config_str(
    ext: &str,
    content: &str,
    path_display: &str,
) -> Result<ServiceConfig, PlugchainError> {
    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => serde_yml::from_str(content).map_err(|e| PlugchainError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "json")]
        "json" => serde_json::from_str(content).map_err(|e| PlugchainError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "toml")]
        "toml" => toml::from_str(content).map_err(|e| PlugchainError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        other => {
            let _ = (content, path_display);
            Err(PlugchainError::UnsupportedFormat(other.to_string()))
        }
    }
}

/// Compute a lowercase hex-encoded SHA-256 digest.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_is_stable_hex() {
        let digest = sha256_hex(b"plugchain");
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, sha256_hex(b"plugchain"));
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let err = parse_config_str("ini", "", "cfg.ini").unwrap_err();
        assert!(matches!(err, PlugchainError::UnsupportedFormat(ref ext) if ext == "ini"));
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_parse_error_names_the_file() {
        let err = parse_config_str("json", "{", "cfg.json").unwrap_err();
        assert!(err.to_string().contains("cfg.json"));
    }
}
