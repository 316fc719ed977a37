//! Merge route - multipart upload in, merged PDF out.

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
};
use axum_extra::extract::Multipart;
use pdf_merger_core::{Error, UploadPolicy, UploadedFile, DEFAULT_FILENAME};
use std::sync::Arc;
use tracing::{error, info};

use crate::helpers::{CoreResultExt, ResultExt, RouteResult, MERGE_FAILED_MESSAGE};
use crate::state::AppState;

/// Multipart field carrying the files to merge.
pub const UPLOAD_FIELD: &str = "pdfs";

/// Name the merged document is offered under.
pub const MERGED_FILENAME: &str = "merged.pdf";

/// Merge the uploaded PDFs and send the result as a download.
///
/// Every part is checked while it is read, so a wrong content type or an
/// oversize file is rejected before any merging starts. On success the
/// filename list is replaced with the names of the uploaded files.
pub async fn merge_pdfs(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> RouteResult<Response> {
    let files = read_uploads(&mut multipart, state.merger.policy())
        .await
        .or_route_error()?;

    let names: Vec<String> = files.iter().map(|f| f.filename.clone()).collect();
    info!("Merging {} uploaded files: {:?}", names.len(), names);

    // lopdf is synchronous and CPU-bound
    let merger = state.merger.clone();
    let output = tokio::task::spawn_blocking(move || merger.merge_uploads(&files))
        .await
        .map_err(|e| {
            error!("Merge task panicked: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                MERGE_FAILED_MESSAGE.to_string(),
            )
        })?
        .or_route_error()?;

    state.replace_files(names).await;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{MERGED_FILENAME}\""),
        )
        .body(Body::from(output.bytes))
        .or_internal_error()
}

/// Read every `pdfs` part into memory, enforcing `policy` as bytes arrive.
async fn read_uploads(
    multipart: &mut Multipart,
    policy: &UploadPolicy,
) -> pdf_merger_core::Result<Vec<UploadedFile>> {
    let mut files = Vec::new();

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        // Browsers send an empty, nameless part when no file was picked
        let filename = match field.file_name() {
            Some("") => continue,
            Some(name) => name.to_string(),
            None => DEFAULT_FILENAME.to_string(),
        };
        let content_type = field.content_type().map(str::to_string);
        policy.check_content_type(&filename, content_type.as_deref())?;

        let mut bytes = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            policy.check_size(&filename, bytes.len() + chunk.len())?;
            bytes.extend_from_slice(&chunk);
        }

        files.push(UploadedFile::new(
            filename,
            content_type.unwrap_or_default(),
            bytes,
        ));
    }

    policy.check_count(files.len())?;
    Ok(files)
}

fn multipart_error(err: impl std::fmt::Display) -> Error {
    Error::Multipart(err.to_string())
}
