use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// MIME type every uploaded file must declare
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Default per-file size cap (10 MB)
pub const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Minimum number of files a merge request must carry
pub const DEFAULT_MIN_FILES: usize = 2;

/// Upload limits applied to every merge request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Largest accepted file, in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,

    /// Fewest files a merge may be requested with
    #[serde(default = "default_min_files")]
    pub min_files: usize,

    /// Exact content type each file must declare
    #[serde(default = "default_content_type")]
    pub accepted_content_type: String,

    /// Cap on the whole request body, in bytes
    #[serde(default = "default_max_request_size")]
    pub max_request_size: usize,
}

const fn default_max_file_size() -> usize {
    DEFAULT_MAX_FILE_SIZE
}

const fn default_min_files() -> usize {
    DEFAULT_MIN_FILES
}

fn default_content_type() -> String {
    PDF_CONTENT_TYPE.to_string()
}

const fn default_max_request_size() -> usize {
    200 * 1024 * 1024
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            min_files: default_min_files(),
            accepted_content_type: default_content_type(),
            max_request_size: default_max_request_size(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Upload limits
    #[serde(default)]
    pub upload: UploadConfig,
}

impl AppConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::ConfigLoad(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::ConfigLoad(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from default locations (~/.config/pdf-merger/config.toml, ./config.toml)
    pub fn load() -> Self {
        if let Some(config_dir) = crate::util::config_dir() {
            let user_config = config_dir.join("pdf-merger").join("config.toml");
            if user_config.exists() {
                match Self::from_file(&user_config) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {}", user_config.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        let local_config = std::path::PathBuf::from("config.toml");
        if local_config.exists() {
            match Self::from_file(&local_config) {
                Ok(config) => {
                    tracing::debug!("Loaded config from ./config.toml");
                    return config;
                }
                Err(e) => {
                    tracing::warn!("Failed to load ./config.toml: {}", e);
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Self::default()
    }

    /// Reject values that would make every upload fail.
    pub fn validate(&self) -> Result<()> {
        let upload = &self.upload;
        if upload.max_file_size == 0 {
            return Err(invalid("upload.max_file_size", "must be greater than zero"));
        }
        if upload.min_files == 0 {
            return Err(invalid("upload.min_files", "must be at least 1"));
        }
        if upload.accepted_content_type.trim().is_empty() {
            return Err(invalid("upload.accepted_content_type", "must not be empty"));
        }
        if upload.max_request_size < upload.max_file_size {
            return Err(invalid(
                "upload.max_request_size",
                "must be at least upload.max_file_size",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> Error {
    Error::ConfigInvalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
