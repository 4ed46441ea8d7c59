//! Spreadsheet export of the live notes.

use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Local;

use notes_db::models::note::Note;

use crate::error::{AppError, AppResult};
use crate::export::{build_workbook, XLSX_CONTENT_TYPE};
use crate::state::AppState;

pub const EXPORT_SHEET_NAME: &str = "Notes";
pub const EXPORT_HEADERS: [&str; 6] = ["Id", "Name", "Title", "Category", "Created", "CreatedBy"];

/// One spreadsheet row per note, in [`EXPORT_HEADERS`] order.
///
/// `created` is shown in server local time.
pub fn note_rows(notes: &[Note]) -> Vec<Vec<String>> {
    notes
        .iter()
        .map(|note| {
            vec![
                note.id.to_string(),
                note.name.clone().unwrap_or_default(),
                note.title.clone().unwrap_or_default(),
                note.category.clone().unwrap_or_default(),
                note.created
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string(),
                note.created_by.clone().unwrap_or_default(),
            ]
        })
        .collect()
}

/// GET /notes/export/excel
///
/// Download every live note as an `.xlsx` workbook.
pub async fn export_notes_excel(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let notes = state.store.list().await?;
    if notes.is_empty() {
        return Err(AppError::NotFound("No note records found.".to_string()));
    }

    let workbook = build_workbook(EXPORT_SHEET_NAME, &EXPORT_HEADERS, &note_rows(&notes))
        .map_err(|e| AppError::InternalError(format!("Failed to build workbook: {e}")))?;

    let file_name = format!("{}_Notes.xlsx", Local::now().format("%Y%m%d%H%M%S"));
    let disposition = format!("attachment; filename=\"{file_name}\"");

    tracing::info!(rows = notes.len(), file_name = %file_name, "Notes exported");

    Ok((
        StatusCode::OK,
        [(CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()), (CONTENT_DISPOSITION, disposition)],
        workbook,
    ))
}
