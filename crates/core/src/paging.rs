//! Paged note listing: sort orders, page validation and search-term helpers.

use crate::error::CoreError;

/// Default page size when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Sort orders accepted by the paged listing.
///
/// Every order uses `id` as the final tie-break so that page boundaries are
/// stable across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteSortOrder {
    /// Ascending by name.
    Name,
    /// Descending by name.
    NameDesc,
    /// Ascending by display order.
    #[default]
    DisplayOrder,
}

impl NoteSortOrder {
    /// Parse a caller-supplied sort key.
    ///
    /// Unknown or absent values fall back to [`NoteSortOrder::DisplayOrder`].
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("Name") => Self::Name,
            Some("NameDesc") => Self::NameDesc,
            _ => Self::DisplayOrder,
        }
    }

    /// The wire name of this sort order.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::NameDesc => "NameDesc",
            Self::DisplayOrder => "DisplayOrder",
        }
    }

    /// SQL `ORDER BY` body for this sort order.
    pub fn order_by_sql(self) -> &'static str {
        match self {
            Self::Name => "name ASC, id ASC",
            Self::NameDesc => "name DESC, id ASC",
            Self::DisplayOrder => "display_order ASC, id ASC",
        }
    }
}

/// Validate paging parameters and return the row offset.
///
/// `page_index` is zero-based. A non-positive `page_size`, a negative
/// `page_index`, or an offset that overflows `i64` is rejected.
pub fn page_offset(page_index: i64, page_size: i64) -> Result<i64, CoreError> {
    if page_size <= 0 {
        return Err(CoreError::Validation(format!(
            "page_size must be positive, got {page_size}"
        )));
    }
    if page_index < 0 {
        return Err(CoreError::Validation(format!(
            "page_index must not be negative, got {page_index}"
        )));
    }
    page_index
        .checked_mul(page_size)
        .ok_or_else(|| CoreError::Validation("page_index * page_size overflows".to_string()))
}

/// Treat whitespace-only filter values as absent.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Escape `\`, `%` and `_` so a search term matches literally inside a
/// `LIKE`/`ILIKE` pattern (Postgres default escape character is `\`).
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
