use notes_core::error::CoreError;

/// Error returned by [`NoteStore`](crate::store::NoteStore) operations.
///
/// "Nothing matched" is never an error: stores report it through `None`
/// or `false`. Only invalid input and backend failures end up here.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Input rejected before reaching the backend.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx (connectivity, timeout, constraint).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
