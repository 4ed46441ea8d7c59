//! Route definitions for notes.
//!
//! Mounted at `/notes` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{export, notes};
use crate::state::AppState;

/// Note routes.
///
/// ```text
/// GET    /                   -> list_notes
/// POST   /                   -> create_note
/// GET    /page               -> list_notes_paged (?page_index, page_size, search_query, sort_order, category)
/// GET    /export/excel       -> export_notes_excel
/// GET    /{id}               -> get_note
/// PUT    /{id}               -> update_note
/// DELETE /{id}               -> delete_note
/// POST   /{id}/move-up       -> move_note_up
/// POST   /{id}/move-down     -> move_note_down
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notes::list_notes).post(notes::create_note))
        .route("/page", get(notes::list_notes_paged))
        .route("/export/excel", get(export::export_notes_excel))
        .route(
            "/{id}",
            get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
        .route("/{id}/move-up", post(notes::move_note_up))
        .route("/{id}/move-down", post(notes::move_note_down))
}
