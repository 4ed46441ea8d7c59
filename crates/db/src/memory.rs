//! Process-local [`NoteStore`] adapter.
//!
//! Holds all rows in a `Vec` behind one async mutex, so every operation,
//! including the reorder read-locate-swap, is atomic with respect to every
//! other. Soft-deleted rows stay in the vector like they do in the table.
//! Name ordering compares Rust strings (byte order), not a database
//! collation.

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::Utc;
use notes_core::ordering::MoveDirection;
use notes_core::paging::{non_blank, page_offset, NoteSortOrder};
use notes_core::types::DbId;
use tokio::sync::Mutex;

use crate::error::StoreResult;
use crate::models::note::{CreateNote, Note, NotePage, NoteQuery, UpdateNote};
use crate::store::NoteStore;

#[derive(Debug)]
struct MemoryState {
    rows: Vec<Note>,
    next_id: DbId,
}

/// [`NoteStore`] kept entirely in memory.
#[derive(Debug)]
pub struct MemoryNoteStore {
    state: Mutex<MemoryState>,
}

impl Default for MemoryNoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                rows: Vec::new(),
                next_id: 1,
            }),
        }
    }

    async fn swap_with_neighbor(&self, id: DbId, direction: MoveDirection) -> bool {
        let mut state = self.state.lock().await;
        let rows = &mut state.rows;

        let Some(current_idx) = rows.iter().position(|n| n.id == id && !n.is_deleted) else {
            return false;
        };
        let current_order = rows[current_idx].display_order;

        let candidates = rows
            .iter()
            .filter(|n| !n.is_deleted)
            .map(|n| (n.display_order, n.id));
        let Some((neighbor_order, neighbor_id)) =
            direction.pick_neighbor(current_order, candidates)
        else {
            return false;
        };
        let Some(neighbor_idx) = rows.iter().position(|n| n.id == neighbor_id) else {
            return false;
        };

        rows[current_idx].display_order = neighbor_order;
        rows[neighbor_idx].display_order = current_order;
        true
    }
}

/// Case-insensitive substring match on an optional name.
fn name_contains(name: Option<&str>, term: &str) -> bool {
    name.is_some_and(|n| n.to_lowercase().contains(&term.to_lowercase()))
}

/// Compare optional names with `NULL` sorting after every value, matching
/// PostgreSQL's default for ascending order.
fn cmp_name_nulls_last(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

fn compare(order: NoteSortOrder, a: &Note, b: &Note) -> Ordering {
    let primary = match order {
        NoteSortOrder::Name => cmp_name_nulls_last(a.name.as_deref(), b.name.as_deref()),
        // Reversing the arguments also moves NULLs first, as DESC does.
        NoteSortOrder::NameDesc => cmp_name_nulls_last(b.name.as_deref(), a.name.as_deref()),
        NoteSortOrder::DisplayOrder => a.display_order.cmp(&b.display_order),
    };
    primary.then(a.id.cmp(&b.id))
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn add(&self, input: &CreateNote) -> StoreResult<Note> {
        input.validate()?;

        let mut state = self.state.lock().await;
        let max_order = state
            .rows
            .iter()
            .filter(|n| !n.is_deleted)
            .map(|n| n.display_order)
            .max()
            .unwrap_or(0);

        let note = Note {
            id: state.next_id,
            name: input.name.clone(),
            category: input.category.clone(),
            title: input.title.clone(),
            file_name: input.file_name.clone(),
            content: input.content.clone(),
            created_by: input.created_by.clone(),
            parent_key: input.parent_key.clone(),
            created: Utc::now(),
            display_order: max_order + 1,
            active: input.active,
            is_deleted: false,
            parent_id: input.parent_id,
            file_size: input.file_size,
            down_count: input.down_count,
        };
        state.next_id += 1;
        state.rows.push(note.clone());

        tracing::debug!(note_id = note.id, display_order = note.display_order, "Note inserted");
        Ok(note)
    }

    async fn list(&self) -> StoreResult<Vec<Note>> {
        let state = self.state.lock().await;
        let mut notes: Vec<Note> = state.rows.iter().filter(|n| !n.is_deleted).cloned().collect();
        notes.sort_by(|a, b| compare(NoteSortOrder::DisplayOrder, a, b));
        Ok(notes)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Note>> {
        let state = self.state.lock().await;
        Ok(state
            .rows
            .iter()
            .find(|n| n.id == id && !n.is_deleted)
            .cloned())
    }

    async fn update(&self, id: DbId, input: &UpdateNote) -> StoreResult<Option<Note>> {
        input.validate()?;

        let mut state = self.state.lock().await;
        Ok(state
            .rows
            .iter_mut()
            .find(|n| n.id == id && !n.is_deleted)
            .map(|note| {
                input.apply_to(note);
                note.clone()
            }))
    }

    async fn soft_delete(&self, id: DbId) -> StoreResult<bool> {
        let mut state = self.state.lock().await;
        match state.rows.iter_mut().find(|n| n.id == id && !n.is_deleted) {
            Some(note) => {
                note.is_deleted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_paged(&self, query: &NoteQuery) -> StoreResult<NotePage> {
        let offset = page_offset(query.page_index, query.page_size)?;
        let search = non_blank(query.search_query.as_deref());
        let category = non_blank(query.category.as_deref());

        let state = self.state.lock().await;
        let mut matches: Vec<&Note> = state
            .rows
            .iter()
            .filter(|n| !n.is_deleted)
            .filter(|n| search.map_or(true, |term| name_contains(n.name.as_deref(), term)))
            .filter(|n| category.map_or(true, |c| n.category.as_deref() == Some(c)))
            .collect();
        matches.sort_by(|a, b| compare(query.sort_order, a, b));

        let total_count = matches.len() as i64;
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(query.page_size).unwrap_or(usize::MAX);
        let items = matches.into_iter().skip(skip).take(take).cloned().collect();

        Ok(NotePage { items, total_count })
    }

    async fn move_up(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.swap_with_neighbor(id, MoveDirection::Up).await)
    }

    async fn move_down(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.swap_with_neighbor(id, MoveDirection::Down).await)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
