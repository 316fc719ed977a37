use std::path::Path;

use lopdf::{Document, ObjectId};

use crate::error::{Error, Result};

/// A parsed PDF together with its page references in reading order
pub struct PdfDocument {
    inner: Document,
    /// Page object ids, first page first
    page_ids: Vec<ObjectId>,
}

impl PdfDocument {
    /// Parse a PDF from bytes
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Result<Self> {
        Self::load_indexed(0, bytes.as_ref())
    }

    /// Open a PDF from a file path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(bytes)
    }

    /// Parse the `index`-th input of a merge; parse errors carry that index.
    pub(crate) fn load_indexed(index: usize, bytes: &[u8]) -> Result<Self> {
        let inner = Document::load_mem(bytes).map_err(|e| Error::PdfParse {
            index,
            reason: e.to_string(),
        })?;

        // get_pages is keyed by 1-based page number, so values come out in order
        let page_ids = inner.get_pages().into_values().collect();

        Ok(Self { inner, page_ids })
    }

    /// Get number of pages
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Decoded content stream of the page at `page` (0-indexed).
    pub fn page_content(&self, page: usize) -> Result<Vec<u8>> {
        let id = self
            .page_ids
            .get(page)
            .copied()
            .ok_or_else(|| Error::IndexOutOfRange {
                index: page,
                len: self.page_ids.len(),
            })?;

        self.inner
            .get_page_content(id)
            .map_err(|e| Error::PdfStructure(format!("unreadable content on page {page}: {e}")))
    }

    /// Decoded content streams of every page, in order.
    pub fn page_contents(&self) -> Result<Vec<Vec<u8>>> {
        (0..self.page_count()).map(|page| self.page_content(page)).collect()
    }

    pub(crate) fn into_parts(self) -> (Document, Vec<ObjectId>) {
        (self.inner, self.page_ids)
    }
}

impl std::fmt::Debug for PdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfDocument")
            .field("version", &self.inner.version)
            .field("page_count", &self.page_ids.len())
            .field("objects", &self.inner.objects.len())
            .finish()
    }
}
