//! Request handlers.
//!
//! Handlers delegate to the [`NoteStore`](notes_db::store::NoteStore) held
//! in [`AppState`](crate::state::AppState) and map errors via
//! [`AppError`](crate::error::AppError).

pub mod export;
pub mod notes;
