//! Askama templates.
//!
//! ## Template Structure
//!
//! - `base.html` - Common layout with CSS
//! - `index.html` - Upload form and the list of last merged files

use askama::Template;
use askama_web::WebTemplate;
use pdf_merger_core::UploadPolicy;
use pdf_merger_core::util::format_size;

/// Homepage with the upload form and the current filename list.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub files: Vec<String>,
    pub min_files: usize,
    /// Per-file cap, already formatted for display (e.g. "10 MB")
    pub max_file_size: String,
}

impl IndexTemplate {
    pub fn new(files: Vec<String>, policy: &UploadPolicy) -> Self {
        Self {
            files,
            min_files: policy.min_files(),
            max_file_size: format_size(policy.max_file_size()),
        }
    }
}
