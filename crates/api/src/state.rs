use std::sync::Arc;

use notes_db::store::NoteStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The note store selected at startup.
    pub store: Arc<dyn NoteStore>,
    pub config: Arc<ServerConfig>,
}
