//! Integration tests for pdf-merger-core
//!
//! These tests verify the end-to-end workflow:
//! - Upload validation ahead of any parsing
//! - Merging real PDFs and reading the result back
//! - The filename list lifecycle around a merge

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream};
use pdf_merger_core::{
    AppConfig, Error, FileList, PDF_CONTENT_TYPE, PdfDocument, PdfMerger, UploadConfig,
    UploadedFile, merge_documents,
};

// =============================================================================
// Test Fixtures
// =============================================================================

/// Build a PDF with `pages` pages, each showing `"{label} page {n}"`.
fn build_pdf(pages: usize, label: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let page_tree_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Courier".to_vec())),
    ]));
    let resources_id = doc.add_object(Dictionary::from_iter([(
        "Font",
        Object::Dictionary(Dictionary::from_iter([("F1", Object::Reference(font_id))])),
    )]));

    let kids: Vec<Object> = (1..=pages)
        .map(|n| {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new(
                        "Tj",
                        vec![Object::string_literal(format!("{label} page {n}"))],
                    ),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(
                Dictionary::new(),
                content.encode().expect("encode content"),
            ));
            Object::Reference(doc.add_object(Dictionary::from_iter([
                ("Type", Object::Name(b"Page".to_vec())),
                ("Parent", Object::Reference(page_tree_id)),
                ("Contents", Object::Reference(content_id)),
                ("Resources", Object::Reference(resources_id)),
                (
                    "MediaBox",
                    Object::Array(vec![0.into(), 0.into(), 595.into(), 842.into()]),
                ),
            ])))
        })
        .collect();

    let page_tree = Dictionary::from_iter([
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(i64::try_from(kids.len()).expect("page count"))),
        ("Kids", Object::Array(kids)),
    ]);
    doc.objects.insert(page_tree_id, Object::Dictionary(page_tree));

    let catalog_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(page_tree_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut output = Vec::new();
    doc.save_to(&mut output).expect("save fixture");
    output
}

fn upload(name: &str, bytes: Vec<u8>) -> UploadedFile {
    UploadedFile::new(name, PDF_CONTENT_TYPE, bytes)
}

fn page_labels(bytes: &[u8]) -> Vec<String> {
    PdfDocument::from_bytes(bytes)
        .expect("merged output parses")
        .page_contents()
        .expect("page contents")
        .into_iter()
        .map(|content| String::from_utf8_lossy(&content).into_owned())
        .collect()
}

// =============================================================================
// Merge Tests
// =============================================================================

#[test]
fn test_merged_page_count_is_sum_of_inputs() {
    for counts in [[1, 1], [3, 1], [2, 5]] {
        let inputs: Vec<Vec<u8>> = counts
            .iter()
            .enumerate()
            .map(|(i, &n)| build_pdf(n, &format!("doc{i}")))
            .collect();

        let output = merge_documents(&inputs).expect("merge");
        let merged = PdfDocument::from_bytes(&output.bytes).expect("parse merged");
        assert_eq!(merged.page_count(), counts.iter().sum::<usize>());
    }
}

#[test]
fn test_merged_pages_follow_input_order() {
    let inputs = vec![build_pdf(2, "alpha"), build_pdf(3, "beta"), build_pdf(1, "gamma")];
    let output = merge_documents(&inputs).expect("merge");

    let labels = page_labels(&output.bytes);
    let expected = [
        "alpha page 1",
        "alpha page 2",
        "beta page 1",
        "beta page 2",
        "beta page 3",
        "gamma page 1",
    ];
    assert_eq!(labels.len(), expected.len());
    for (content, label) in labels.iter().zip(expected) {
        assert!(content.contains(label), "expected '{label}' in '{content}'");
    }
}

#[test]
fn test_single_document_merge_keeps_page_content() {
    let original = build_pdf(4, "solo");
    let output = merge_documents(std::slice::from_ref(&original)).expect("merge");

    assert_eq!(page_labels(&output.bytes), page_labels(&original));
}

#[test]
fn test_merge_output_can_be_merged_again() {
    let first = merge_documents(&[build_pdf(1, "a"), build_pdf(1, "b")]).expect("merge");
    let second = merge_documents(&[first.bytes, build_pdf(2, "c")]).expect("merge again");

    assert_eq!(second.input_page_counts, vec![2, 2]);
    assert_eq!(PdfDocument::from_bytes(&second.bytes).expect("parse").page_count(), 4);
}

#[test]
fn test_invalid_pdf_bytes() {
    let inputs = vec![build_pdf(1, "ok"), Vec::new()];
    let err = merge_documents(&inputs).expect_err("empty input must fail");
    assert!(matches!(err, Error::PdfParse { index: 1, .. }));
}

// =============================================================================
// Merger (validation + merge) Tests
// =============================================================================

#[test]
fn test_merger_merges_valid_uploads() {
    let merger = PdfMerger::new(&AppConfig::default());
    let files = [upload("a.pdf", build_pdf(1, "a")), upload("b.pdf", build_pdf(2, "b"))];

    let output = merger.merge_uploads(&files).expect("merge");
    assert_eq!(output.page_count(), 3);
}

#[test]
fn test_merger_rejects_zero_and_one_file() {
    let merger = PdfMerger::new(&AppConfig::default());

    assert!(matches!(
        merger.merge_uploads(&[]),
        Err(Error::TooFewFiles { got: 0, .. })
    ));
    assert!(matches!(
        merger.merge_uploads(&[upload("a.pdf", build_pdf(1, "a"))]),
        Err(Error::TooFewFiles { got: 1, .. })
    ));
}

#[test]
fn test_merger_rejects_oversize_upload() {
    let config = AppConfig {
        upload: UploadConfig {
            max_file_size: 64,
            ..UploadConfig::default()
        },
    };
    let merger = PdfMerger::new(&config);
    let big = build_pdf(1, "big");
    assert!(big.len() > 64);

    let err = merger
        .merge_uploads(&[upload("big.pdf", big), upload("b.pdf", vec![0; 8])])
        .expect_err("oversize upload");
    assert!(err.is_validation());
}

#[test]
fn test_merger_parse_error_is_not_validation() {
    let merger = PdfMerger::new(&AppConfig::default());
    let files = [upload("a.pdf", build_pdf(1, "a")), upload("b.pdf", b"not a pdf at all".to_vec())];

    let err = merger.merge_uploads(&files).expect_err("garbage input");
    assert!(!err.is_validation());
    assert!(matches!(err, Error::PdfParse { index: 1, .. }));
}

// =============================================================================
// Filename List Tests
// =============================================================================

#[test]
fn test_file_list_after_successful_merge() {
    let merger = PdfMerger::new(&AppConfig::default());
    let mut list = FileList::new();
    list.replace(["previous.pdf"]);

    let files = [upload("a.pdf", build_pdf(1, "a")), upload("b.pdf", build_pdf(1, "b"))];
    merger.merge_uploads(&files).expect("merge");
    list.replace(files.iter().map(|f| f.filename.clone()));

    assert_eq!(list.names(), ["a.pdf", "b.pdf"]);

    assert_eq!(list.remove(0).as_deref(), Some("a.pdf"));
    assert_eq!(list.remove(5), None);
    assert_eq!(list.names(), ["b.pdf"]);
}

// =============================================================================
// Document Loading Tests
// =============================================================================

#[test]
fn test_document_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("three.pdf");
    std::fs::write(&path, build_pdf(3, "file")).expect("write fixture");

    let doc = PdfDocument::from_file(&path).expect("load from file");
    assert_eq!(doc.page_count(), 3);
    assert!(doc.page_content(3).is_err());
}

#[test]
fn test_document_from_missing_file() {
    let err = PdfDocument::from_file("/nonexistent/missing.pdf").expect_err("missing file");
    assert!(matches!(err, Error::Io(_)));
}
