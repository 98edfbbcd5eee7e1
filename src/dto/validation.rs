//! Validation helpers for DTOs.

use validator::{ValidationError, ValidationErrors};

/// Longest display name kept, in characters.
pub const MAX_DISPLAY_NAME_CHARS: usize = 40;

/// Validates that a required text field is not blank.
pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("field is required".into());
        return Err(err);
    }
    Ok(())
}

/// Comma-separated, sorted list of the fields that failed validation.
pub fn failed_fields(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();
    fields.join(", ")
}

/// Canonical form of a free-text display name: trimmed, capped at
/// [`MAX_DISPLAY_NAME_CHARS`] characters, trimmed again.
///
/// Returns `None` when nothing is left.
///
/// # Examples
///
/// ```ignore
/// normalize_display_name("  Ada  ")   // Some("Ada")
/// normalize_display_name("   ")       // None
/// ```
pub fn normalize_display_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let capped: String = trimmed.chars().take(MAX_DISPLAY_NAME_CHARS).collect();
    let name = capped.trim_end();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
