//! HTTP route handlers for the PDF merger web application.
//!
//! The homepage is rendered with Askama; `/merge` answers with the merged
//! PDF as a download or a plain-text error; `/delete/{index}` always
//! redirects back to the homepage.

mod files;
mod merge;
mod pages;

pub use files::delete_file;
pub use merge::{merge_pdfs, MERGED_FILENAME, UPLOAD_FIELD};
pub use pages::index;
