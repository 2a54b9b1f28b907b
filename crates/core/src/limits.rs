//! Entity input length limits and the checks that enforce them.
//!
//! Lengths are counted in characters, not bytes.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

pub const WORLD_TITLE_MAX: usize = 100;
pub const WORLD_SUMMARY_MAX: usize = 500;
pub const CARD_TYPE_NAME_MAX: usize = 50;
pub const CARD_TYPE_DESCRIPTION_MAX: usize = 200;
pub const CARD_NAME_MAX: usize = 200;
pub const CARD_SUMMARY_MAX: usize = 500;
pub const FOLDER_NAME_MAX: usize = 100;
pub const FOLDER_DESCRIPTION_MAX: usize = 200;
pub const DISPLAY_NAME_MAX: usize = 100;
pub const SAVED_SEARCH_NAME_MAX: usize = 100;

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// A required text input: non-blank and at most `max` characters.
pub fn validate_required(label: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{label} is required")));
    }
    validate_max(label, value, max)
}

/// An optional text input: at most `max` characters when present.
pub fn validate_optional(label: &str, value: Option<&str>, max: usize) -> Result<(), CoreError> {
    match value {
        Some(v) => validate_max(label, v, max),
        None => Ok(()),
    }
}

fn validate_max(label: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{label} must be at most {max} characters"
        )));
    }
    Ok(())
}
