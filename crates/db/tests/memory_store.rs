//! `NoteStore` contract tests against the in-memory adapter.
//!
//! These need no database and exercise the same checks as `pg_store.rs`.

mod common;

use std::sync::Arc;

use notes_db::memory::MemoryNoteStore;
use notes_db::store::NoteStore;

fn store() -> MemoryNoteStore {
    MemoryNoteStore::new()
}

#[tokio::test]
async fn adds_get_strictly_increasing_display_order() {
    common::adds_get_strictly_increasing_display_order(&store()).await;
}

#[tokio::test]
async fn add_sets_defaults() {
    common::add_sets_defaults(&store()).await;
}

#[tokio::test]
async fn add_after_delete_uses_live_max() {
    common::add_after_delete_uses_live_max(&store()).await;
}

#[tokio::test]
async fn oversize_name_is_rejected() {
    common::oversize_name_is_rejected(&store()).await;
}

#[tokio::test]
async fn find_missing_returns_none() {
    common::find_missing_returns_none(&store()).await;
}

#[tokio::test]
async fn update_patches_supplied_fields() {
    common::update_patches_supplied_fields(&store()).await;
}

#[tokio::test]
async fn update_with_null_clears_field() {
    common::update_with_null_clears_field(&store()).await;
}

#[tokio::test]
async fn update_missing_returns_none() {
    common::update_missing_returns_none(&store()).await;
}

#[tokio::test]
async fn delete_hides_note_everywhere() {
    common::delete_hides_note_everywhere(&store()).await;
}

#[tokio::test]
async fn move_up_then_down_round_trips() {
    common::move_up_then_down_round_trips(&store()).await;
}

#[tokio::test]
async fn move_at_edges_is_noop() {
    common::move_at_edges_is_noop(&store()).await;
}

#[tokio::test]
async fn move_missing_returns_false() {
    common::move_missing_returns_false(&store()).await;
}

#[tokio::test]
async fn move_skips_deleted_neighbors() {
    common::move_skips_deleted_neighbors(&store()).await;
}

#[tokio::test]
async fn abc_scenario() {
    common::abc_scenario(&store()).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_moves_preserve_order_set() {
    let store: Arc<dyn NoteStore> = Arc::new(store());
    common::concurrent_moves_preserve_order_set(store).await;
}

#[tokio::test]
async fn paging_splits_five_into_two_two_one() {
    common::paging_splits_five_into_two_two_one(&store()).await;
}

#[tokio::test]
async fn category_filter_is_exact() {
    common::category_filter_is_exact(&store()).await;
}

#[tokio::test]
async fn search_matches_name_substring() {
    common::search_matches_name_substring(&store()).await;
}

#[tokio::test]
async fn sort_by_name_both_directions() {
    common::sort_by_name_both_directions(&store()).await;
}

#[tokio::test]
async fn invalid_paging_is_rejected() {
    common::invalid_paging_is_rejected(&store()).await;
}
