pub mod health;
pub mod notes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /notes                        list, create
/// /notes/page                   paged, filtered listing
/// /notes/export/excel           spreadsheet download
/// /notes/{id}                   get, update, delete
/// /notes/{id}/move-up           swap with previous
/// /notes/{id}/move-down         swap with next
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/notes", notes::router())
}
