use pdf_merger_core::{AppConfig, FileList, PdfMerger};
use tokio::sync::RwLock;

/// Global application state
///
/// Handlers receive it through axum's `State` extractor; there is no
/// process-global list.
pub struct AppState {
    /// Filenames from the most recent successful merge
    files: RwLock<FileList>,
    /// Merger carrying the configured upload policy
    pub merger: PdfMerger,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            files: RwLock::new(FileList::new()),
            merger: PdfMerger::new(&config),
            config,
        }
    }

    /// Snapshot of the current filename list.
    pub async fn file_names(&self) -> Vec<String> {
        self.files.read().await.names().to_vec()
    }

    /// Replace the whole list after a successful merge.
    pub async fn replace_files(&self, names: Vec<String>) {
        self.files.write().await.replace(names);
    }

    /// Remove one entry; out-of-range indices leave the list untouched.
    pub async fn remove_file(&self, index: usize) -> Option<String> {
        self.files.write().await.remove(index)
    }
}
