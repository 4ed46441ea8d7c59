//! Behaviour checks shared by the memory and PostgreSQL store tests.
//!
//! Each check takes a fresh, empty store and asserts one property of the
//! `NoteStore` contract, so both adapters are held to the same behaviour.

#![allow(dead_code)]

use std::sync::Arc;

use assert_matches::assert_matches;
use notes_core::error::CoreError;
use notes_core::paging::NoteSortOrder;
use notes_core::types::DbId;
use notes_db::error::StoreError;
use notes_db::models::note::{CreateNote, Note, NoteQuery, UpdateNote};
use notes_db::store::NoteStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn named(name: &str) -> CreateNote {
    CreateNote {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

pub fn in_category(name: &str, category: &str) -> CreateNote {
    CreateNote {
        name: Some(name.to_string()),
        category: Some(category.to_string()),
        ..Default::default()
    }
}

pub async fn add_all(store: &dyn NoteStore, names: &[&str]) -> Vec<Note> {
    let mut notes = Vec::with_capacity(names.len());
    for name in names {
        notes.push(store.add(&named(name)).await.unwrap());
    }
    notes
}

pub async fn listed_ids(store: &dyn NoteStore) -> Vec<DbId> {
    store.list().await.unwrap().iter().map(|n| n.id).collect()
}

fn page_query(page_index: i64, page_size: i64) -> NoteQuery {
    NoteQuery {
        page_index,
        page_size,
        ..Default::default()
    }
}

fn ids(notes: &[Note]) -> Vec<DbId> {
    notes.iter().map(|n| n.id).collect()
}

fn names(notes: &[Note]) -> Vec<&str> {
    notes.iter().filter_map(|n| n.name.as_deref()).collect()
}

// ---------------------------------------------------------------------------
// Add / list
// ---------------------------------------------------------------------------

pub async fn adds_get_strictly_increasing_display_order(store: &dyn NoteStore) {
    let notes = add_all(store, &["a", "b", "c", "d", "e", "f"]).await;

    assert_eq!(notes[0].display_order, 1, "first note should get display order 1");
    for pair in notes.windows(2) {
        assert!(
            pair[0].display_order < pair[1].display_order,
            "display order should increase in insertion order"
        );
        assert!(pair[0].id < pair[1].id, "ids should never be reused");
    }
    assert_eq!(listed_ids(store).await, ids(&notes));
}

pub async fn add_sets_defaults(store: &dyn NoteStore) {
    let before = chrono::Utc::now() - chrono::Duration::seconds(5);
    let note = store
        .add(&CreateNote {
            name: Some("defaults".to_string()),
            title: Some("Title".to_string()),
            active: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(!note.is_deleted);
    assert!(note.created >= before, "created should be set to now");
    assert_eq!(note.title.as_deref(), Some("Title"));
    assert_eq!(note.active, Some(true));
    assert_eq!(note.category, None);
}

pub async fn add_after_delete_uses_live_max(store: &dyn NoteStore) {
    let notes = add_all(store, &["a", "b", "c"]).await;
    assert!(store.soft_delete(notes[2].id).await.unwrap());

    let next = store.add(&named("d")).await.unwrap();
    assert_eq!(next.display_order, notes[1].display_order + 1);
    assert_ne!(next.id, notes[2].id);
}

pub async fn oversize_name_is_rejected(store: &dyn NoteStore) {
    let result = store.add(&named(&"n".repeat(256))).await;
    assert_matches!(result, Err(StoreError::Core(CoreError::Validation(_))));
    assert!(store.list().await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Find / update / delete
// ---------------------------------------------------------------------------

pub async fn find_missing_returns_none(store: &dyn NoteStore) {
    assert!(store.find_by_id(987_654).await.unwrap().is_none());
}

pub async fn update_patches_supplied_fields(store: &dyn NoteStore) {
    let created = store.add(&in_category("draft", "x")).await.unwrap();

    let updated = store
        .update(
            created.id,
            &UpdateNote {
                name: Some(Some("final".to_string())),
                content: Some(Some("body".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .expect("live note should update");

    assert_eq!(updated.name.as_deref(), Some("final"));
    assert_eq!(updated.content.as_deref(), Some("body"));
    assert_eq!(updated.category.as_deref(), Some("x"));
    assert_eq!(updated.display_order, created.display_order);
    assert_eq!(updated.created, created.created);

    let found = store.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found.name.as_deref(), Some("final"));
}

pub async fn update_with_null_clears_field(store: &dyn NoteStore) {
    let created = store.add(&in_category("filed", "x")).await.unwrap();

    let updated = store
        .update(
            created.id,
            &UpdateNote {
                category: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .expect("live note should update");

    assert_eq!(updated.category, None);
    assert_eq!(updated.name.as_deref(), Some("filed"));

    let uncategorized = store
        .list_paged(&NoteQuery {
            category: Some("x".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(uncategorized.total_count, 0);
}

pub async fn update_missing_returns_none(store: &dyn NoteStore) {
    let result = store.update(424_242, &UpdateNote::default()).await.unwrap();
    assert!(result.is_none());
}

pub async fn delete_hides_note_everywhere(store: &dyn NoteStore) {
    let notes = add_all(store, &["a", "b", "c"]).await;
    let victim = notes[1].id;

    assert!(store.soft_delete(victim).await.unwrap());

    assert!(store.find_by_id(victim).await.unwrap().is_none());
    assert!(!listed_ids(store).await.contains(&victim));
    assert!(store
        .update(victim, &UpdateNote {
            name: Some(Some("ghost".to_string())),
            ..Default::default()
        })
        .await
        .unwrap()
        .is_none());
    assert!(!store.move_up(victim).await.unwrap());
    assert!(!store.move_down(victim).await.unwrap());

    let page = store.list_paged(&page_query(0, 10)).await.unwrap();
    assert_eq!(page.total_count, 2);
    assert!(!ids(&page.items).contains(&victim));

    assert!(
        !store.soft_delete(victim).await.unwrap(),
        "second delete should report nothing matched"
    );
}

// ---------------------------------------------------------------------------
// Reordering
// ---------------------------------------------------------------------------

pub async fn move_up_then_down_round_trips(store: &dyn NoteStore) {
    let notes = add_all(store, &["a", "b", "c"]).await;
    let original = listed_ids(store).await;

    assert!(store.move_up(notes[1].id).await.unwrap());
    assert_eq!(
        listed_ids(store).await,
        vec![notes[1].id, notes[0].id, notes[2].id]
    );

    assert!(store.move_down(notes[1].id).await.unwrap());
    assert_eq!(listed_ids(store).await, original);

    let restored = store.find_by_id(notes[1].id).await.unwrap().unwrap();
    assert_eq!(restored.display_order, notes[1].display_order);
}

pub async fn move_at_edges_is_noop(store: &dyn NoteStore) {
    let notes = add_all(store, &["a", "b", "c"]).await;
    let before: Vec<(DbId, i32)> = store
        .list()
        .await
        .unwrap()
        .iter()
        .map(|n| (n.id, n.display_order))
        .collect();

    assert!(!store.move_up(notes[0].id).await.unwrap());
    assert!(!store.move_down(notes[2].id).await.unwrap());

    let after: Vec<(DbId, i32)> = store
        .list()
        .await
        .unwrap()
        .iter()
        .map(|n| (n.id, n.display_order))
        .collect();
    assert_eq!(before, after);
}

pub async fn move_missing_returns_false(store: &dyn NoteStore) {
    assert!(!store.move_up(31_337).await.unwrap());
    assert!(!store.move_down(31_337).await.unwrap());
}

pub async fn move_skips_deleted_neighbors(store: &dyn NoteStore) {
    let notes = add_all(store, &["a", "b", "c"]).await;
    assert!(store.soft_delete(notes[1].id).await.unwrap());

    assert!(store.move_up(notes[2].id).await.unwrap());
    assert_eq!(listed_ids(store).await, vec![notes[2].id, notes[0].id]);
}

pub async fn abc_scenario(store: &dyn NoteStore) {
    let notes = add_all(store, &["A", "B", "C"]).await;

    let page = store
        .list_paged(&NoteQuery {
            page_index: 0,
            page_size: 10,
            search_query: Some(String::new()),
            sort_order: NoteSortOrder::DisplayOrder,
            category: Some(String::new()),
        })
        .await
        .unwrap();
    assert_eq!(names(&page.items), vec!["A", "B", "C"]);
    assert_eq!(page.total_count, 3);

    assert!(store.move_up(notes[2].id).await.unwrap());
    let listed = store.list().await.unwrap();
    assert_eq!(names(&listed), vec!["A", "C", "B"]);
}

/// Hammer overlapping reorders from many tasks. Swaps only ever exchange
/// two existing values, so the set of display orders must survive intact.
pub async fn concurrent_moves_preserve_order_set(store: Arc<dyn NoteStore>) {
    let notes = add_all(store.as_ref(), &["a", "b", "c", "d", "e"]).await;
    let mut expected: Vec<i32> = notes.iter().map(|n| n.display_order).collect();
    expected.sort_unstable();

    let mut handles = Vec::new();
    for round in 0..40usize {
        let store = Arc::clone(&store);
        let id = notes[round % notes.len()].id;
        handles.push(tokio::spawn(async move {
            if round % 2 == 0 {
                store.move_up(id).await
            } else {
                store.move_down(id).await
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let mut actual: Vec<i32> = store
        .list()
        .await
        .unwrap()
        .iter()
        .map(|n| n.display_order)
        .collect();
    actual.sort_unstable();
    assert_eq!(actual, expected, "display orders must remain a permutation");
}

// ---------------------------------------------------------------------------
// Paging
// ---------------------------------------------------------------------------

pub async fn paging_splits_five_into_two_two_one(store: &dyn NoteStore) {
    let notes = add_all(store, &["n1", "n2", "n3", "n4", "n5"]).await;

    let mut seen = Vec::new();
    for (page_index, expected_len) in [(0, 2), (1, 2), (2, 1)] {
        let page = store.list_paged(&page_query(page_index, 2)).await.unwrap();
        assert_eq!(page.total_count, 5);
        assert_eq!(page.items.len(), expected_len, "page {page_index}");
        seen.extend(ids(&page.items));
    }
    assert_eq!(seen, ids(&notes), "pages should be disjoint and in order");

    let beyond = store.list_paged(&page_query(3, 2)).await.unwrap();
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total_count, 5);
}

pub async fn category_filter_is_exact(store: &dyn NoteStore) {
    store.add(&in_category("one", "x")).await.unwrap();
    store.add(&in_category("two", "x")).await.unwrap();
    store.add(&in_category("three", "y")).await.unwrap();
    store.add(&in_category("four", "xx")).await.unwrap();

    let page = store
        .list_paged(&NoteQuery {
            category: Some("x".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total_count, 2);
    assert_eq!(names(&page.items), vec!["one", "two"]);
}

pub async fn search_matches_name_substring(store: &dyn NoteStore) {
    add_all(store, &["Weekly plan", "Groceries", "PLANNING", "100% done", "1000 done"]).await;
    store.add(&CreateNote::default()).await.unwrap();

    let page = store
        .list_paged(&NoteQuery {
            search_query: Some("plan".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total_count, 2);
    assert_eq!(names(&page.items), vec!["Weekly plan", "PLANNING"]);

    let literal = store
        .list_paged(&NoteQuery {
            search_query: Some("100%".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(names(&literal.items), vec!["100% done"]);
}

pub async fn sort_by_name_both_directions(store: &dyn NoteStore) {
    add_all(store, &["cherry", "apple", "banana"]).await;

    let asc = store
        .list_paged(&NoteQuery {
            sort_order: NoteSortOrder::Name,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(names(&asc.items), vec!["apple", "banana", "cherry"]);

    let desc = store
        .list_paged(&NoteQuery {
            sort_order: NoteSortOrder::NameDesc,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(names(&desc.items), vec!["cherry", "banana", "apple"]);
}

pub async fn invalid_paging_is_rejected(store: &dyn NoteStore) {
    for (page_index, page_size) in [(0, 0), (0, -1), (-1, 10)] {
        let result = store.list_paged(&page_query(page_index, page_size)).await;
        assert_matches!(
            result,
            Err(StoreError::Core(CoreError::Validation(_))),
            "page_index={page_index} page_size={page_size}"
        );
    }
}
