//! Note entity model and DTOs.
//!
//! Notes are soft-deleted (`is_deleted`) and manually ordered by
//! `display_order`; see [`NoteStore`](crate::store::NoteStore) for the
//! contract that maintains both.

use notes_core::error::CoreError;
use notes_core::notes::validate_note_text;
use notes_core::paging::{NoteSortOrder, DEFAULT_PAGE_SIZE};
use notes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A row from the `notes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Note {
    pub id: DbId,
    pub name: Option<String>,
    pub category: Option<String>,
    pub title: Option<String>,
    pub file_name: Option<String>,
    pub content: Option<String>,
    pub created_by: Option<String>,
    pub parent_key: Option<String>,
    pub created: Timestamp,
    pub display_order: i32,
    pub active: Option<bool>,
    pub is_deleted: bool,
    pub parent_id: Option<DbId>,
    pub file_size: Option<i32>,
    pub down_count: Option<i32>,
}

/// DTO for creating a new note.
///
/// `id`, `created`, `display_order` and `is_deleted` are assigned by the
/// store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateNote {
    pub name: Option<String>,
    pub category: Option<String>,
    pub title: Option<String>,
    pub file_name: Option<String>,
    pub content: Option<String>,
    pub created_by: Option<String>,
    pub parent_key: Option<String>,
    pub active: Option<bool>,
    pub parent_id: Option<DbId>,
    pub file_size: Option<i32>,
    pub down_count: Option<i32>,
}

impl CreateNote {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_note_text(
            self.name.as_deref(),
            self.title.as_deref(),
            self.file_name.as_deref(),
        )
    }
}

/// A patchable field: `None` leaves the column alone, `Some(None)` clears
/// it, `Some(Some(v))` sets it.
pub type Patch<T> = Option<Option<T>>;

/// Deserialize a [`Patch`] so that an explicit JSON `null` becomes
/// `Some(None)`. Combined with `#[serde(default)]`, an absent key stays
/// `None`.
fn nullable<'de, T, D>(deserializer: D) -> Result<Patch<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// DTO for updating an existing note.
///
/// Every field is a [`Patch`]. `created` is immutable and `display_order`
/// only changes through move-up/move-down.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNote {
    #[serde(default, deserialize_with = "nullable")]
    pub name: Patch<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub category: Patch<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub title: Patch<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub file_name: Patch<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub content: Patch<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub created_by: Patch<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub parent_key: Patch<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub active: Patch<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub parent_id: Patch<DbId>,
    #[serde(default, deserialize_with = "nullable")]
    pub file_size: Patch<i32>,
    #[serde(default, deserialize_with = "nullable")]
    pub down_count: Patch<i32>,
}

impl UpdateNote {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_note_text(
            self.name.as_ref().and_then(Option::as_deref),
            self.title.as_ref().and_then(Option::as_deref),
            self.file_name.as_ref().and_then(Option::as_deref),
        )
    }

    /// Apply the supplied fields to `note`, clearing those patched to `None`.
    pub fn apply_to(&self, note: &mut Note) {
        fn patch<T: Clone>(target: &mut Option<T>, value: &Patch<T>) {
            if let Some(value) = value {
                target.clone_from(value);
            }
        }

        patch(&mut note.name, &self.name);
        patch(&mut note.category, &self.category);
        patch(&mut note.title, &self.title);
        patch(&mut note.file_name, &self.file_name);
        patch(&mut note.content, &self.content);
        patch(&mut note.created_by, &self.created_by);
        patch(&mut note.parent_key, &self.parent_key);
        patch(&mut note.active, &self.active);
        patch(&mut note.parent_id, &self.parent_id);
        patch(&mut note.file_size, &self.file_size);
        patch(&mut note.down_count, &self.down_count);
    }
}

/// Parameters for a paged, filtered note listing.
#[derive(Debug, Clone)]
pub struct NoteQuery {
    /// Zero-based page number.
    pub page_index: i64,
    pub page_size: i64,
    /// Substring matched against `name`; blank means no filter.
    pub search_query: Option<String>,
    pub sort_order: NoteSortOrder,
    /// Exact `category` match; blank means no filter.
    pub category: Option<String>,
}

impl Default for NoteQuery {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            search_query: None,
            sort_order: NoteSortOrder::default(),
            category: None,
        }
    }
}

/// One page of notes plus the number of matches before pagination.
#[derive(Debug, Clone, Serialize)]
pub struct NotePage {
    pub items: Vec<Note>,
    pub total_count: i64,
}
