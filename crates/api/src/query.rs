//! Query parameter types for API handlers.

use notes_core::paging::{NoteSortOrder, DEFAULT_PAGE_SIZE};
use notes_db::models::note::NoteQuery;
use serde::Deserialize;

/// Paged listing parameters
/// (`?page_index=&page_size=&search_query=&sort_order=&category=`).
///
/// Range checks happen in the store, which rejects a non-positive size or a
/// negative index with a validation error.
#[derive(Debug, Default, Deserialize)]
pub struct NotePageParams {
    pub page_index: Option<i64>,
    pub page_size: Option<i64>,
    pub search_query: Option<String>,
    pub sort_order: Option<String>,
    pub category: Option<String>,
}

impl NotePageParams {
    pub fn into_query(self) -> NoteQuery {
        NoteQuery {
            page_index: self.page_index.unwrap_or(0),
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            sort_order: NoteSortOrder::parse(self.sort_order.as_deref()),
            search_query: self.search_query,
            category: self.category,
        }
    }
}
