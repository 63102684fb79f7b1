//! Field validation for student and faculty input.
//!
//! Handlers call these before touching the store so malformed input is
//! reported as a 400 rather than surfacing as a database error.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a name or color, in characters.
pub const MAX_TEXT_LEN: usize = 255;

/// Highest accepted student age.
pub const MAX_AGE: i32 = 150;

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// Validate a required text field (`name`, `color`).
///
/// Rules:
/// - Must not be empty or whitespace only.
/// - Must not exceed `MAX_TEXT_LEN` characters.
pub fn validate_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be blank")));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must not exceed {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a student age. Must be in `0..=MAX_AGE`.
pub fn validate_age(age: i32) -> Result<(), CoreError> {
    if (0..=MAX_AGE).contains(&age) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "age must be between 0 and {MAX_AGE}, got {age}"
        )))
    }
}

/// Validate an inclusive age range used for filtering.
pub fn validate_age_range(min: i32, max: i32) -> Result<(), CoreError> {
    if min > max {
        return Err(CoreError::Validation(format!(
            "min ({min}) must not be greater than max ({max})"
        )));
    }
    Ok(())
}

/// Validate a row limit for report queries. Must not be negative.
pub fn validate_limit(limit: i64) -> Result<(), CoreError> {
    if limit < 0 {
        return Err(CoreError::Validation(format!(
            "limit must not be negative, got {limit}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
