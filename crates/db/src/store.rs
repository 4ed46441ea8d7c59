//! The ordered note repository contract and its PostgreSQL adapter.
//!
//! Callers hold an `Arc<dyn NoteStore>` chosen once at startup from
//! [`StoreBackend`]; nothing downstream knows which adapter is in use.

use async_trait::async_trait;
use notes_core::paging::page_offset;
use notes_core::types::DbId;
use sqlx::PgPool;

use crate::error::StoreResult;
use crate::models::note::{CreateNote, Note, NotePage, NoteQuery, UpdateNote};
use crate::repositories::NoteRepo;

/// Persistence and ordering contract for notes.
///
/// Soft-deleted notes are invisible to every operation. "Nothing matched"
/// is reported as `None`/`false`, never as an error.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Insert a note at the end of the display order.
    async fn add(&self, input: &CreateNote) -> StoreResult<Note>;

    /// All live notes, ascending by display order.
    async fn list(&self) -> StoreResult<Vec<Note>>;

    /// The live note with this id, if any.
    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Note>>;

    /// Patch a live note. `None` if no live row matched.
    async fn update(&self, id: DbId, input: &UpdateNote) -> StoreResult<Option<Note>>;

    /// Mark a live note deleted. `false` if no live row matched.
    async fn soft_delete(&self, id: DbId) -> StoreResult<bool>;

    /// One filtered, sorted page plus the total match count.
    async fn list_paged(&self, query: &NoteQuery) -> StoreResult<NotePage>;

    /// Swap with the previous live note. `false` if missing or first.
    async fn move_up(&self, id: DbId) -> StoreResult<bool>;

    /// Swap with the next live note. `false` if missing or last.
    async fn move_down(&self, id: DbId) -> StoreResult<bool>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> StoreResult<()>;
}

/// Which [`NoteStore`] adapter to construct at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// [`PgNoteStore`] over a PostgreSQL pool.
    Postgres,
    /// [`MemoryNoteStore`](crate::memory::MemoryNoteStore), process-local.
    Memory,
}

impl StoreBackend {
    /// Parse a backend name (`postgres` or `memory`, case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            "memory" | "in-memory" => Some(Self::Memory),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Memory => "memory",
        }
    }
}

/// [`NoteStore`] backed by PostgreSQL through [`NoteRepo`].
#[derive(Debug, Clone)]
pub struct PgNoteStore {
    pool: PgPool,
}

impl PgNoteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl NoteStore for PgNoteStore {
    async fn add(&self, input: &CreateNote) -> StoreResult<Note> {
        input.validate()?;
        let note = NoteRepo::create(&self.pool, input).await?;
        tracing::debug!(note_id = note.id, display_order = note.display_order, "Note inserted");
        Ok(note)
    }

    async fn list(&self) -> StoreResult<Vec<Note>> {
        Ok(NoteRepo::list(&self.pool).await?)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Note>> {
        Ok(NoteRepo::find_by_id(&self.pool, id).await?)
    }

    async fn update(&self, id: DbId, input: &UpdateNote) -> StoreResult<Option<Note>> {
        input.validate()?;
        Ok(NoteRepo::update(&self.pool, id, input).await?)
    }

    async fn soft_delete(&self, id: DbId) -> StoreResult<bool> {
        Ok(NoteRepo::soft_delete(&self.pool, id).await?)
    }

    async fn list_paged(&self, query: &NoteQuery) -> StoreResult<NotePage> {
        let offset = page_offset(query.page_index, query.page_size)?;
        let (items, total_count) = NoteRepo::list_page(&self.pool, query, offset).await?;
        Ok(NotePage { items, total_count })
    }

    async fn move_up(&self, id: DbId) -> StoreResult<bool> {
        Ok(NoteRepo::move_up(&self.pool, id).await?)
    }

    async fn move_down(&self, id: DbId) -> StoreResult<bool> {
        Ok(NoteRepo::move_down(&self.pool, id).await?)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
