use thiserror::Error;

/// Unified error type for pdf-merger-core
///
/// Variants fall into four groups:
/// - Upload validation (rejected before any merge work)
/// - PDF operations (parsing inputs, serializing the merged output)
/// - Filename list lookups
/// - Configuration and general I/O
#[derive(Error, Debug)]
pub enum Error {
    // ==========================================================================
    // Validation Errors
    // ==========================================================================
    /// Not enough files were uploaded to perform a merge
    #[error("please upload at least {min} PDF files (got {got})")]
    TooFewFiles { min: usize, got: usize },

    /// An uploaded file declared a content type other than PDF
    #[error("only PDF files are allowed: '{filename}' was sent as '{content_type}'")]
    UnsupportedContentType {
        filename: String,
        content_type: String,
    },

    /// An uploaded file exceeded the per-file size cap
    #[error("file '{filename}' exceeds the {limit} byte limit")]
    FileTooLarge { filename: String, limit: usize },

    /// The multipart request body could not be read
    #[error("malformed upload: {0}")]
    Multipart(String),

    // ==========================================================================
    // PDF Errors
    // ==========================================================================
    /// An input could not be parsed as a PDF document
    #[error("failed to parse PDF #{index}: {reason}")]
    PdfParse { index: usize, reason: String },

    /// The merge was asked to combine nothing
    #[error("no documents to merge")]
    NoDocuments,

    /// A parsed document is structurally unusable (e.g. missing page tree)
    #[error("invalid PDF structure: {0}")]
    PdfStructure(String),

    /// Failed to serialize the merged document
    #[error("failed to save PDF: {0}")]
    PdfSave(String),

    // ==========================================================================
    // Filename List Errors
    // ==========================================================================
    /// A list index did not refer to an existing entry
    #[error("index {index} out of range (list has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    // ==========================================================================
    // Configuration Errors
    // ==========================================================================
    /// Failed to load configuration file
    #[error("failed to load config: {0}")]
    ConfigLoad(String),

    /// Invalid configuration value
    #[error("invalid config value for '{field}': {reason}")]
    ConfigInvalid { field: String, reason: String },

    // ==========================================================================
    // I/O Errors
    // ==========================================================================
    /// General I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error was caused by the caller's input rather than by
    /// the merge itself.
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::TooFewFiles { .. }
                | Self::UnsupportedContentType { .. }
                | Self::FileTooLarge { .. }
                | Self::Multipart(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
