//! Names of the files that went into the most recent merge.

use crate::error::{Error, Result};

/// Ordered list of filenames shown on the homepage.
///
/// A successful merge replaces the whole list; it never appends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileList {
    names: Vec<String>,
}

impl FileList {
    pub const fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Discard the current entries and store `names` in the given order.
    pub fn replace<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
    }

    /// Remove the entry at `index`, failing when it does not exist.
    pub fn try_remove(&mut self, index: usize) -> Result<String> {
        if index < self.names.len() {
            Ok(self.names.remove(index))
        } else {
            Err(Error::IndexOutOfRange {
                index,
                len: self.names.len(),
            })
        }
    }

    /// Remove the entry at `index` if there is one.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        self.try_remove(index).ok()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
