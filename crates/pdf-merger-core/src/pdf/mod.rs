mod document;
pub mod merge;

pub use document::PdfDocument;
pub use merge::{MergeOutput, merge_documents, merge_with_progress};
