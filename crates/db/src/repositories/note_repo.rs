//! Repository for the `notes` table.
//!
//! Every query filters on `is_deleted = false`; soft-deleted rows are only
//! reachable through direct SQL.

use notes_core::ordering::MoveDirection;
use notes_core::paging::{escape_like, non_blank};
use notes_core::types::DbId;
use sqlx::PgPool;

use crate::models::note::{CreateNote, Note, NoteQuery, UpdateNote};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, category, title, file_name, content, created_by, parent_key, \
    created, display_order, active, is_deleted, parent_id, file_size, down_count";

/// SQLSTATE raised when a serializable transaction cannot commit.
const SERIALIZATION_FAILURE: &str = "40001";

/// SQLSTATE raised when Postgres breaks a lock cycle.
const DEADLOCK_DETECTED: &str = "40P01";

/// Provides CRUD, paging and reordering for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Insert a new note at the end of the display order.
    ///
    /// `display_order` is computed in the same statement as
    /// `1 + max(display_order)` over live notes, so the first note gets 1.
    /// Two concurrent inserts can still read the same max and tie; ties are
    /// tolerated everywhere because every ordering falls back to `id`.
    pub async fn create(pool: &PgPool, input: &CreateNote) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes \
                (active, is_deleted, created, created_by, name, display_order, file_name, \
                 file_size, down_count, parent_id, parent_key, category, title, content) \
             SELECT $1, false, NOW(), $2, $3, COALESCE(MAX(display_order), 0) + 1, $4, \
                 $5, $6, $7, $8, $9, $10, $11 \
             FROM notes WHERE is_deleted = false \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(input.active)
            .bind(&input.created_by)
            .bind(&input.name)
            .bind(&input.file_name)
            .bind(input.file_size)
            .bind(input.down_count)
            .bind(input.parent_id)
            .bind(&input.parent_key)
            .bind(&input.category)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Find a live note by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1 AND is_deleted = false");
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all live notes in display order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes WHERE is_deleted = false ORDER BY display_order, id"
        );
        sqlx::query_as::<_, Note>(&query).fetch_all(pool).await
    }

    /// Update a live note.
    ///
    /// Each [`Patch`](crate::models::note::Patch) field is written only when
    /// present; a present `None` stores `NULL`. Returns `None` if no live row
    /// with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNote,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "UPDATE notes SET \
                name = CASE WHEN $2 THEN $3 ELSE name END, \
                category = CASE WHEN $4 THEN $5 ELSE category END, \
                title = CASE WHEN $6 THEN $7 ELSE title END, \
                file_name = CASE WHEN $8 THEN $9 ELSE file_name END, \
                content = CASE WHEN $10 THEN $11 ELSE content END, \
                created_by = CASE WHEN $12 THEN $13 ELSE created_by END, \
                parent_key = CASE WHEN $14 THEN $15 ELSE parent_key END, \
                active = CASE WHEN $16 THEN $17 ELSE active END, \
                parent_id = CASE WHEN $18 THEN $19 ELSE parent_id END, \
                file_size = CASE WHEN $20 THEN $21 ELSE file_size END, \
                down_count = CASE WHEN $22 THEN $23 ELSE down_count END \
             WHERE id = $1 AND is_deleted = false \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(input.name.is_some())
            .bind(input.name.clone().flatten())
            .bind(input.category.is_some())
            .bind(input.category.clone().flatten())
            .bind(input.title.is_some())
            .bind(input.title.clone().flatten())
            .bind(input.file_name.is_some())
            .bind(input.file_name.clone().flatten())
            .bind(input.content.is_some())
            .bind(input.content.clone().flatten())
            .bind(input.created_by.is_some())
            .bind(input.created_by.clone().flatten())
            .bind(input.parent_key.is_some())
            .bind(input.parent_key.clone().flatten())
            .bind(input.active.is_some())
            .bind(input.active.flatten())
            .bind(input.parent_id.is_some())
            .bind(input.parent_id.flatten())
            .bind(input.file_size.is_some())
            .bind(input.file_size.flatten())
            .bind(input.down_count.is_some())
            .bind(input.down_count.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a live note. Returns `false` if none matched.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE notes SET is_deleted = true WHERE id = $1 AND is_deleted = false")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch one page of live notes plus the total match count.
    ///
    /// Both statements run in one `REPEATABLE READ` read-only transaction,
    /// so `total_count` and the page come from the same snapshot. `offset`
    /// is the already-validated row offset for `query.page_index`.
    pub async fn list_page(
        pool: &PgPool,
        query: &NoteQuery,
        offset: i64,
    ) -> Result<(Vec<Note>, i64), sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_note_filter(query);

        let count_sql = format!("SELECT COUNT(*)::BIGINT AS count FROM notes {where_clause}");
        let page_sql = format!(
            "SELECT {COLUMNS} FROM notes {where_clause} \
             ORDER BY {} \
             LIMIT ${bind_idx} OFFSET ${}",
            query.sort_order.order_by_sql(),
            bind_idx + 1
        );

        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let mut count = sqlx::query_scalar::<_, i64>(&count_sql);
        for value in &bind_values {
            count = count.bind(value.as_str());
        }
        let total_count = count.fetch_one(&mut *tx).await?;

        let mut page = sqlx::query_as::<_, Note>(&page_sql);
        for value in &bind_values {
            page = page.bind(value.as_str());
        }
        let items = page
            .bind(query.page_size)
            .bind(offset)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((items, total_count))
    }

    /// Swap a note with the live note just before it in display order.
    ///
    /// Returns `false` if the note is missing, already first, or the swap
    /// lost a race with a concurrent reorder.
    pub async fn move_up(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        Self::swap_with_neighbor(pool, id, MoveDirection::Up).await
    }

    /// Swap a note with the live note just after it in display order.
    ///
    /// Returns `false` if the note is missing, already last, or the swap
    /// lost a race with a concurrent reorder.
    pub async fn move_down(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        Self::swap_with_neighbor(pool, id, MoveDirection::Down).await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn swap_with_neighbor(
        pool: &PgPool,
        id: DbId,
        direction: MoveDirection,
    ) -> Result<bool, sqlx::Error> {
        match Self::swap_in_transaction(pool, id, direction).await {
            Err(err) if is_reorder_conflict(&err) => {
                tracing::warn!(
                    note_id = id,
                    direction = direction.as_str(),
                    error = %err,
                    "Reorder conflict, swap rolled back"
                );
                Ok(false)
            }
            other => other,
        }
    }

    /// Locate, lock and swap inside one transaction.
    ///
    /// Both rows are taken `FOR UPDATE` before either is written. Any early
    /// return drops the transaction, which rolls it back.
    async fn swap_in_transaction(
        pool: &PgPool,
        id: DbId,
        direction: MoveDirection,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current: Option<(DbId, i32)> = sqlx::query_as(
            "SELECT id, display_order FROM notes \
             WHERE id = $1 AND is_deleted = false \
             FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((current_id, current_order)) = current else {
            return Ok(false);
        };

        let neighbor: Option<(DbId, i32)> =
            sqlx::query_as(&neighbor_sql(direction, true))
                .bind(current_order)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((neighbor_id, neighbor_order)) = neighbor else {
            return Ok(false);
        };

        // A row lock that had to wait is re-checked against WHERE only, not
        // ORDER BY, so the locked row may no longer be the nearest one.
        let nearest: Option<(DbId, i32)> = sqlx::query_as(&neighbor_sql(direction, false))
            .bind(current_order)
            .fetch_optional(&mut *tx)
            .await?;
        if nearest != Some((neighbor_id, neighbor_order)) {
            tracing::warn!(
                note_id = id,
                neighbor_id,
                direction = direction.as_str(),
                "Neighbor changed while locking, swap abandoned"
            );
            return Ok(false);
        }

        sqlx::query("UPDATE notes SET display_order = $2 WHERE id = $1")
            .bind(current_id)
            .bind(neighbor_order)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE notes SET display_order = $2 WHERE id = $1")
            .bind(neighbor_id)
            .bind(current_order)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}

/// Select the nearest live note beyond `$1` in `direction`.
fn neighbor_sql(direction: MoveDirection, lock: bool) -> String {
    format!(
        "SELECT id, display_order FROM notes \
         WHERE is_deleted = false AND display_order {} $1 \
         ORDER BY {} \
         LIMIT 1{}",
        direction.comparison_sql(),
        direction.neighbor_order_sql(),
        if lock { " FOR UPDATE" } else { "" }
    )
}

/// Whether `err` is a serialization failure or deadlock, i.e. the reorder
/// collided with another transaction rather than failing outright.
pub fn is_reorder_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => matches!(
            db_err.code().as_deref(),
            Some(SERIALIZATION_FAILURE | DEADLOCK_DETECTED)
        ),
        _ => false,
    }
}

/// Build a WHERE clause and bind values from `NoteQuery` filters.
///
/// Returns `(where_clause, bind_values, next_bind_index)`. The clause always
/// restricts to live rows. All filter values are text.
fn build_note_filter(query: &NoteQuery) -> (String, Vec<String>, u32) {
    let mut conditions: Vec<String> = vec!["is_deleted = false".to_string()];
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<String> = Vec::new();

    if let Some(term) = non_blank(query.search_query.as_deref()) {
        conditions.push(format!("name ILIKE ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(format!("%{}%", escape_like(term)));
    }

    if let Some(category) = non_blank(query.category.as_deref()) {
        conditions.push(format!("category = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(category.to_string());
    }

    (
        format!("WHERE {}", conditions.join(" AND ")),
        bind_values,
        bind_idx,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
