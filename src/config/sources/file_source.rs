//! Generic async file-based config source with SHA256 versioning.
//!
//! [`FileSource`] implements [`ConfigSource`] for any file format by
//! accepting a deserialization function at construction time. It reads
//! the file asynchronously via Tokio, validates the result, and computes
//! a SHA256 hash identifying the loaded content.

use std::path::PathBuf;

use async_trait::async_trait;

use super::sha256_hex;
use crate::config::model::ServiceConfig;
use crate::config::validation::validate;
use crate::config::{ConfigSource, ConfigVersion};
use crate::error::PlugchainError;

type Deserialize = fn(&str) -> Result<ServiceConfig, Box<dyn std::error::Error + Send + Sync>>;

pub struct FileSource {
    path: PathBuf,
    name: &'static str,
    deserialize: Deserialize,
}

impl FileSource {
    #[must_use]
    pub fn new(path: PathBuf, name: &'static str, deserialize: Deserialize) -> Self {
        Self {
            path,
            name,
            deserialize,
        }
    }

    async fn read_content(&self) -> Result<String, PlugchainError> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PlugchainError::ConfigFileNotFound {
                    path: self.path.clone(),
                }
            } else {
                PlugchainError::Io(e)
            }
        })
    }
}

#[async_trait]
impl ConfigSource for FileSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn load(&self) -> Result<(ServiceConfig, ConfigVersion), PlugchainError> {
        let content = self.read_content().await?;

        let config = (self.deserialize)(&content).map_err(|e| PlugchainError::ConfigParse {
            path: self.path.display().to_string(),
            source: e,
        })?;

        if let Err(errors) = validate(&config) {
            return Err(PlugchainError::ConfigValidation { errors });
        }

        let hash = sha256_hex(content.as_bytes());
        Ok((config, ConfigVersion::Hash(hash)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(content: &str) -> Result<ServiceConfig, Box<dyn std::error::Error + Send + Sync>> {
        serde_json::from_str(content)
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)
    }

    #[tokio::test]
    async fn missing_file_is_reported_by_path() {
        let source = FileSource::new(PathBuf::from("does/not/exist.json"), "json", json);
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, PlugchainError::ConfigFileNotFound { .. }));
    }

    #[tokio::test]
    async fn loads_validates_and_hashes() {
        let path = std::env::temp_dir().join(format!("plugchain-{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, r#"{"name": "svc", "port": 9000}"#)
            .await
            .unwrap();

        let source = FileSource::new(path.clone(), "json", json);
        let (config, version) = source.load().await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(source.name(), "json");
        assert_eq!(config.name, "svc");
        assert_eq!(config.port, 9000);
        assert_eq!(version.short().len(), 8);
    }

    #[tokio::test]
    async fn invalid_config_fails_validation() {
        let path = std::env::temp_dir().join(format!("plugchain-{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, r#"{"host": "localhost"}"#)
            .await
            .unwrap();

        let source = FileSource::new(path.clone(), "json", json);
        let err = source.load().await.unwrap_err();
        let _ = tokio::fs::remove_file(&path).await;

        assert!(matches!(err, PlugchainError::ConfigValidation { .. }));
    }
}
