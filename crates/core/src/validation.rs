//! Shared field rules for `#[derive(Validate)]` inputs.

use validator::ValidationError;

/// Error code reported by [`not_blank`].
pub const BLANK: &str = "blank";

/// Rejects values that are empty once surrounding whitespace is removed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(BLANK));
    }
    Ok(())
}
