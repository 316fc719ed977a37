//! PDF Merger Core Library
//!
//! This library provides the core functionality for merging PDF documents:
//! - Page-level concatenation of PDFs via lopdf
//! - Upload validation (count, content type, size)
//! - The list of most recently merged filenames
//! - Configuration loading

pub mod config;
pub mod error;
pub mod file_list;
pub mod pdf;
pub mod upload;
pub mod util;

pub use config::{AppConfig, UploadConfig, DEFAULT_MAX_FILE_SIZE, DEFAULT_MIN_FILES, PDF_CONTENT_TYPE};
pub use error::{Error, Result};
pub use file_list::FileList;
pub use pdf::{MergeOutput, PdfDocument, merge_documents, merge_with_progress};
pub use upload::{UploadPolicy, UploadedFile, DEFAULT_FILENAME};

use tracing::info;

/// High-level merger that applies the upload policy before merging
#[derive(Debug, Clone, Default)]
pub struct PdfMerger {
    policy: UploadPolicy,
}

impl PdfMerger {
    /// Create a merger enforcing the limits in `config`
    pub fn new(config: &AppConfig) -> Self {
        Self {
            policy: UploadPolicy::new(&config.upload),
        }
    }

    pub const fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Validate a batch of uploads and merge them in the order given.
    ///
    /// Validation failures are returned before any PDF is parsed.
    pub fn merge_uploads(&self, files: &[UploadedFile]) -> Result<MergeOutput> {
        self.policy.check_batch(files)?;

        let buffers: Vec<&[u8]> = files.iter().map(|f| f.bytes.as_slice()).collect();
        let output = merge_documents(&buffers)?;

        info!(
            "Merged {} files ({} pages, {} bytes)",
            files.len(),
            output.page_count(),
            output.bytes.len()
        );

        Ok(output)
    }
}
