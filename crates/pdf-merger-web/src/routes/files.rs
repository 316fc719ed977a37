//! Filename list routes.

use axum::extract::{Path, State};
use axum::response::Redirect;
use std::sync::Arc;
use tracing::debug;

use crate::helpers::parse_index;
use crate::state::AppState;

/// Remove one entry from the filename list, then go back to the homepage.
///
/// Indices that are not numbers or fall outside the list are ignored; the
/// redirect happens either way.
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(raw_index): Path<String>,
) -> Redirect {
    match parse_index(&raw_index) {
        Some(index) => match state.remove_file(index).await {
            Some(name) => debug!("Removed {} from file list", name),
            None => debug!("Ignoring delete of missing index {}", index),
        },
        None => debug!("Ignoring delete with non-numeric index {:?}", raw_index),
    }

    Redirect::to("/")
}
