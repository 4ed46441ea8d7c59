//! Additive, idempotent schema evolution for the `notes` table.
//!
//! Adds optional columns that older deployments may lack. Each column is
//! checked in `information_schema` first and only added when missing, so
//! the pass is safe to run on every start.

use sqlx::PgPool;

/// Table the enhancer operates on.
pub const NOTES_TABLE: &str = "notes";

/// Optional columns and their definitions, applied in order.
pub const OPTIONAL_COLUMNS: &[(&str, &str)] = &[
    ("post_date", "TIMESTAMPTZ NULL DEFAULT NOW()"),
    ("post_ip", "VARCHAR(20) NULL"),
    ("read_count", "INTEGER NULL DEFAULT 0"),
    ("title", "VARCHAR(512) NULL"),
];

/// Ensures the optional `notes` columns exist.
pub struct SchemaEnhancer;

impl SchemaEnhancer {
    /// Run the enhancement pass, logging and swallowing any failure.
    ///
    /// Startup must not abort because an optional column could not be
    /// added.
    pub async fn run(pool: &PgPool) {
        match Self::enhance_notes_table(pool).await {
            Ok(added) if added.is_empty() => {
                tracing::debug!(table = NOTES_TABLE, "Schema already up to date");
            }
            Ok(added) => {
                tracing::info!(table = NOTES_TABLE, columns = ?added, "Schema enhanced");
            }
            Err(e) => {
                tracing::error!(table = NOTES_TABLE, error = %e, "Error while enhancing schema");
            }
        }
    }

    /// Add every missing column from [`OPTIONAL_COLUMNS`].
    ///
    /// Returns the names of the columns that were added.
    pub async fn enhance_notes_table(pool: &PgPool) -> Result<Vec<&'static str>, sqlx::Error> {
        let mut added = Vec::new();

        for &(column, definition) in OPTIONAL_COLUMNS {
            if Self::column_exists(pool, NOTES_TABLE, column).await? {
                continue;
            }

            // Identifiers come from the constants above, never from input.
            let alter = format!("ALTER TABLE {NOTES_TABLE} ADD COLUMN {column} {definition}");
            sqlx::query(&alter).execute(pool).await?;

            tracing::info!(table = NOTES_TABLE, column, "Column added");
            added.push(column);
        }

        Ok(added)
    }

    /// Whether `table.column` exists in the current schema.
    pub async fn column_exists(
        pool: &PgPool,
        table: &str,
        column: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS ( \
                SELECT 1 FROM information_schema.columns \
                WHERE table_schema = current_schema() \
                  AND table_name = $1 AND column_name = $2 \
             )",
        )
        .bind(table)
        .bind(column)
        .fetch_one(pool)
        .await
    }
}
