//! Domain types and validation for the notes service.
//!
//! Pure logic only: no database or HTTP dependencies live here.

pub mod error;
pub mod notes;
pub mod ordering;
pub mod paging;
pub mod types;
