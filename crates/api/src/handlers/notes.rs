//! Handlers for the ordered note repository.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use notes_core::error::CoreError;
use notes_core::notes::NOTE_ENTITY;
use notes_core::ordering::MoveDirection;
use notes_core::types::DbId;
use notes_db::models::note::{CreateNote, UpdateNote};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::query::NotePageParams;
use crate::response::{DataResponse, MoveResult};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: NOTE_ENTITY,
        id,
    })
}

/// GET /notes
///
/// All live notes in display order.
pub async fn list_notes(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let notes = state.store.list().await?;
    Ok(Json(DataResponse { data: notes }))
}

/// POST /notes
pub async fn create_note(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateNote>,
) -> AppResult<impl IntoResponse> {
    let note = state.store.add(&input).await?;

    tracing::info!(
        note_id = note.id,
        display_order = note.display_order,
        "Note created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: note })))
}

/// GET /notes/page?page_index=&page_size=&search_query=&sort_order=&category=
pub async fn list_notes_paged(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<NotePageParams>,
) -> AppResult<impl IntoResponse> {
    let query = params.into_query();
    let page = state.store.list_paged(&query).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /notes/{id}
pub async fn get_note(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let note = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse { data: note }))
}

/// PUT /notes/{id}
///
/// Patch the supplied fields of a live note.
pub async fn update_note(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateNote>,
) -> AppResult<impl IntoResponse> {
    let note = state
        .store
        .update(id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(note_id = id, "Note updated");

    Ok(Json(DataResponse { data: note }))
}

/// DELETE /notes/{id}
///
/// Soft delete. The row stays in storage but disappears from every read.
pub async fn delete_note(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !state.store.soft_delete(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(note_id = id, "Note deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /notes/{id}/move-up
pub async fn move_note_up(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let moved = state.store.move_up(id).await?;
    log_move(id, MoveDirection::Up, moved);
    Ok(Json(DataResponse {
        data: MoveResult { moved },
    }))
}

/// POST /notes/{id}/move-down
pub async fn move_note_down(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let moved = state.store.move_down(id).await?;
    log_move(id, MoveDirection::Down, moved);
    Ok(Json(DataResponse {
        data: MoveResult { moved },
    }))
}

fn log_move(id: DbId, direction: MoveDirection, moved: bool) {
    if moved {
        tracing::info!(note_id = id, direction = direction.as_str(), "Note moved");
    } else {
        tracing::debug!(note_id = id, direction = direction.as_str(), "Note not moved");
    }
}
