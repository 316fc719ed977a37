//! Helper types and traits for cleaner route handlers.
//!
//! Provides extension traits for converting `Result` types into
//! HTTP-appropriate error responses, reducing boilerplate in routes.

use axum::http::StatusCode;
use pdf_merger_core::Error;
use tracing::error;

/// Standard result type for route handlers.
pub type RouteResult<T> = Result<T, (StatusCode, String)>;

/// Body of every 500 response; details go to the log only.
pub const MERGE_FAILED_MESSAGE: &str = "An error occurred while merging the PDFs";

/// Status code for a core error.
///
/// Caller mistakes map to 400, a missing list entry to 404, and anything
/// that went wrong while merging to 500.
pub const fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::TooFewFiles { .. }
        | Error::UnsupportedContentType { .. }
        | Error::FileTooLarge { .. }
        | Error::Multipart(_) => StatusCode::BAD_REQUEST,
        Error::IndexOutOfRange { .. } => StatusCode::NOT_FOUND,
        Error::PdfParse { .. }
        | Error::NoDocuments
        | Error::PdfStructure(_)
        | Error::PdfSave(_)
        | Error::ConfigLoad(_)
        | Error::ConfigInvalid { .. }
        | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert a core error into a plain-text response.
///
/// Client errors echo the error message; server errors are logged and
/// answered with a generic message.
pub fn into_route_error(err: &Error) -> (StatusCode, String) {
    let status = status_for(err);
    if status.is_server_error() {
        error!("Merge error: {}", err);
        (status, MERGE_FAILED_MESSAGE.to_string())
    } else {
        (status, err.to_string())
    }
}

/// Extension trait for converting core `Result`s to `RouteResult<T>`.
pub trait CoreResultExt<T> {
    fn or_route_error(self) -> RouteResult<T>;
}

impl<T> CoreResultExt<T> for pdf_merger_core::Result<T> {
    fn or_route_error(self) -> RouteResult<T> {
        self.map_err(|e| into_route_error(&e))
    }
}

/// Extension trait for converting `Result<T, E>` to `RouteResult<T>`.
pub trait ResultExt<T, E: std::fmt::Display> {
    /// Converts the error to 500 Internal Server Error.
    fn or_internal_error(self) -> RouteResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T, E> for Result<T, E> {
    fn or_internal_error(self) -> RouteResult<T> {
        self.map_err(|e| {
            error!("Internal error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, MERGE_FAILED_MESSAGE.to_string())
        })
    }
}

/// Parse a list index from a path segment.
///
/// Only plain non-negative decimal integers are accepted.
pub fn parse_index(raw: &str) -> Option<usize> {
    raw.trim().parse().ok()
}
