//! Note field limits and validation.
//!
//! `name`, `title` and `file_name` are stored as `VARCHAR(255)`; checking
//! them here lets every store backend reject oversize values the same way
//! instead of surfacing a driver error.

use crate::error::CoreError;

/// Entity label used in `CoreError::NotFound` and log lines.
pub const NOTE_ENTITY: &str = "Note";

/// Maximum length of `name`, in characters.
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum length of `title`, in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum length of `file_name`, in characters.
pub const MAX_FILE_NAME_LENGTH: usize = 255;

/// Validate that an optional text field fits within `max` characters.
pub fn validate_bounded_text(field: &str, value: Option<&str>, max: usize) -> Result<(), String> {
    match value {
        Some(v) if v.chars().count() > max => Err(format!(
            "{field} exceeds maximum length of {max} characters"
        )),
        _ => Ok(()),
    }
}

/// Validate all length-bounded note fields at once.
pub fn validate_note_text(
    name: Option<&str>,
    title: Option<&str>,
    file_name: Option<&str>,
) -> Result<(), CoreError> {
    validate_bounded_text("name", name, MAX_NAME_LENGTH)
        .and_then(|()| validate_bounded_text("title", title, MAX_TITLE_LENGTH))
        .and_then(|()| validate_bounded_text("file_name", file_name, MAX_FILE_NAME_LENGTH))
        .map_err(CoreError::Validation)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
