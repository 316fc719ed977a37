//! Upload validation.
//!
//! Files are checked one at a time as they arrive (content type, then size)
//! and the batch as a whole once every part has been read (file count).
//! Nothing here looks inside the bytes; parsing is left to the merge.

use crate::config::UploadConfig;
use crate::error::{Error, Result};

/// Filename used when a multipart part carries none.
pub const DEFAULT_FILENAME: &str = "document.pdf";

/// A single file received from a client.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl std::fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedFile")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Limits every merge request is held to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    max_file_size: usize,
    min_files: usize,
    accepted_content_type: String,
}

impl UploadPolicy {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            max_file_size: config.max_file_size,
            min_files: config.min_files,
            accepted_content_type: config.accepted_content_type.clone(),
        }
    }

    pub const fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    pub const fn min_files(&self) -> usize {
        self.min_files
    }

    pub fn accepted_content_type(&self) -> &str {
        &self.accepted_content_type
    }

    /// Check a declared content type before any bytes are read.
    ///
    /// The comparison is exact: `application/pdf; charset=binary` or
    /// `APPLICATION/PDF` are rejected.
    pub fn check_content_type(&self, filename: &str, content_type: Option<&str>) -> Result<()> {
        match content_type {
            Some(ct) if ct == self.accepted_content_type => Ok(()),
            other => Err(Error::UnsupportedContentType {
                filename: filename.to_string(),
                content_type: other.unwrap_or("").to_string(),
            }),
        }
    }

    /// Check a running byte count while a file is still streaming in.
    pub fn check_size(&self, filename: &str, size: usize) -> Result<()> {
        if size > self.max_file_size {
            return Err(Error::FileTooLarge {
                filename: filename.to_string(),
                limit: self.max_file_size,
            });
        }
        Ok(())
    }

    /// Check one fully received file.
    pub fn check_file(&self, file: &UploadedFile) -> Result<()> {
        self.check_content_type(&file.filename, Some(&file.content_type))?;
        self.check_size(&file.filename, file.size())
    }

    /// Check the batch size once all parts have been read.
    pub fn check_count(&self, count: usize) -> Result<()> {
        if count < self.min_files {
            return Err(Error::TooFewFiles {
                min: self.min_files,
                got: count,
            });
        }
        Ok(())
    }

    /// Validate a complete batch: every file individually, then the count.
    pub fn check_batch(&self, files: &[UploadedFile]) -> Result<()> {
        for file in files {
            self.check_file(file)?;
        }
        self.check_count(files.len())
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(&UploadConfig::default())
    }
}
