//! Manual display-order maintenance.
//!
//! Notes are reordered by swapping `display_order` with the adjacent live
//! note. The neighbor is the note with the nearest `display_order` strictly
//! beyond the current one; among equal candidates the `id` decides, so the
//! choice never depends on physical row order.

use crate::types::DbId;

/// Direction of a single-step reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Towards smaller `display_order` (earlier in the list).
    Up,
    /// Towards larger `display_order` (later in the list).
    Down,
}

impl MoveDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// Comparison operator selecting neighbor candidates relative to the
    /// current note's `display_order`.
    pub fn comparison_sql(self) -> &'static str {
        match self {
            Self::Up => "<",
            Self::Down => ">",
        }
    }

    /// `ORDER BY` body that puts the nearest candidate first.
    pub fn neighbor_order_sql(self) -> &'static str {
        match self {
            Self::Up => "display_order DESC, id DESC",
            Self::Down => "display_order ASC, id ASC",
        }
    }

    /// Pick the neighbor among `(display_order, id)` candidates.
    ///
    /// Same selection as [`comparison_sql`](Self::comparison_sql) plus
    /// [`neighbor_order_sql`](Self::neighbor_order_sql) with `LIMIT 1`.
    pub fn pick_neighbor<I>(self, current_order: i32, candidates: I) -> Option<(i32, DbId)>
    where
        I: IntoIterator<Item = (i32, DbId)>,
    {
        let beyond = candidates.into_iter().filter(|(order, _)| match self {
            Self::Up => *order < current_order,
            Self::Down => *order > current_order,
        });
        match self {
            Self::Up => beyond.max(),
            Self::Down => beyond.min(),
        }
    }
}
