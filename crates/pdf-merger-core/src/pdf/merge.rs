//! Page-level concatenation of PDF documents.
//!
//! # Strategy
//!
//! The output is built in a fresh document rather than grafted onto the
//! first input:
//! 1. Reserve an object id for the destination page tree
//! 2. For each input, renumber its objects past the destination's highest id
//!    and move them across (document catalogs, page trees and outlines stay
//!    behind)
//! 3. Re-parent each page onto the destination page tree, copying down any
//!    inheritable attribute the page only picked up from its old ancestors
//! 4. Write `Kids` in input order, then add a catalog and serialize
//!
//! Page order is carried by an explicit list, never by object id, so
//! documents whose page objects are numbered out of reading order still
//! merge correctly.

use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::debug;

use super::document::PdfDocument;
use crate::error::{Error, Result};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Bound on page tree depth when resolving inherited attributes.
const MAX_TREE_DEPTH: usize = 64;

/// Result of a successful merge
#[derive(Clone, PartialEq, Eq)]
pub struct MergeOutput {
    /// Serialized merged document
    pub bytes: Vec<u8>,
    /// Page count of each input, in input order
    pub input_page_counts: Vec<usize>,
}

impl MergeOutput {
    /// Total pages in the merged document
    pub fn page_count(&self) -> usize {
        self.input_page_counts.iter().sum()
    }
}

impl std::fmt::Debug for MergeOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MergeOutput")
            .field("bytes_len", &self.bytes.len())
            .field("input_page_counts", &self.input_page_counts)
            .finish()
    }
}

/// Merge PDFs into one document, pages in input order.
///
/// Any input that fails to parse aborts the whole merge. A single input is
/// accepted and yields a document with the same pages; callers wanting a
/// minimum batch size enforce it themselves.
pub fn merge_documents<B: AsRef<[u8]>>(inputs: &[B]) -> Result<MergeOutput> {
    merge_with_progress(inputs, |_, _| {})
}

/// Like [`merge_documents`], calling `progress(done, total)` after each input.
pub fn merge_with_progress<B, F>(inputs: &[B], mut progress: F) -> Result<MergeOutput>
where
    B: AsRef<[u8]>,
    F: FnMut(usize, usize),
{
    if inputs.is_empty() {
        return Err(Error::NoDocuments);
    }

    let mut merged = Document::with_version("1.5");
    let pages_id = merged.new_object_id();

    let mut kids: Vec<ObjectId> = Vec::new();
    let mut input_page_counts = Vec::with_capacity(inputs.len());

    for (index, bytes) in inputs.iter().enumerate() {
        let source = PdfDocument::load_indexed(index, bytes.as_ref())?;
        input_page_counts.push(source.page_count());

        let (mut doc, _) = source.into_parts();
        doc.renumber_objects_with(merged.max_id + 1);
        // Re-read page ids after renumbering; get_pages is ordered by page number
        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();

        let pages = page_ids
            .iter()
            .map(|&id| detached_page(&doc, id, pages_id).map(|dict| (id, dict)))
            .collect::<Result<Vec<_>>>()?;

        merged.max_id = merged.max_id.max(doc.max_id);

        for (object_id, object) in doc.objects {
            match object.type_name().unwrap_or(b"") {
                b"Catalog" | b"Pages" | b"Page" | b"Outlines" | b"Outline" => {}
                _ => {
                    merged.objects.insert(object_id, object);
                }
            }
        }

        for (page_id, dict) in pages {
            merged.objects.insert(page_id, Object::Dictionary(dict));
            kids.push(page_id);
        }

        debug!(
            "Copied {} pages from input #{}",
            input_page_counts[index], index
        );
        progress(index + 1, inputs.len());
    }

    #[allow(clippy::cast_possible_wrap)]
    let count = kids.len() as i64;

    let pages_dict = Dictionary::from_iter([
        ("Type", Object::Name(b"Pages".to_vec())),
        (
            "Kids",
            Object::Array(kids.into_iter().map(Object::Reference).collect()),
        ),
        ("Count", Object::Integer(count)),
    ]);
    merged.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = merged.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    merged.trailer.set("Root", Object::Reference(catalog_id));

    merged.compress();

    let mut bytes = Vec::new();
    merged
        .save_to(&mut bytes)
        .map_err(|e| Error::PdfSave(format!("Failed to save merged PDF: {e}")))?;

    Ok(MergeOutput {
        bytes,
        input_page_counts,
    })
}

/// Copy of a page dictionary hung under `new_parent`, with inherited
/// attributes made explicit.
fn detached_page(doc: &Document, page_id: ObjectId, new_parent: ObjectId) -> Result<Dictionary> {
    let page = doc
        .get_dictionary(page_id)
        .map_err(|e| Error::PdfStructure(format!("page {page_id:?} is not a dictionary: {e}")))?;

    let mut detached = page.clone();
    let mut missing: Vec<&[u8]> = INHERITABLE_KEYS
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect();

    let mut parent = parent_of(page);
    let mut depth = 0;
    while let Some(parent_id) = parent {
        if missing.is_empty() || depth >= MAX_TREE_DEPTH {
            break;
        }
        let Ok(node) = doc.get_dictionary(parent_id) else {
            break;
        };

        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                detached.set(key.to_vec(), value.clone());
                false
            }
            Err(_) => true,
        });

        parent = parent_of(node);
        depth += 1;
    }

    detached.set("Parent", Object::Reference(new_parent));
    Ok(detached)
}

fn parent_of(dict: &Dictionary) -> Option<ObjectId> {
    dict.get(b"Parent").and_then(Object::as_reference).ok()
}
