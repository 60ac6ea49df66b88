//! Input validation helpers
//!
//! Centralized text length constants and the required/optional field
//! checks used by the CRUD handlers. SQLite TEXT has no built-in length
//! enforcement, so limits are applied here.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, category, supplier, recipe, customer
pub const MAX_NAME_LEN: usize = 200;

/// Free-form short fields: status, delivery type
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Delivery addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string field is present, non-empty and within
/// the length limit. Mirrors the wire contract: an absent and an empty
/// field are the same failure.
pub fn require_text(value: Option<&str>, field: &str, max_len: usize) -> Result<String, AppError> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::validation(format!("Missing required field: {field}")))?;
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(value.to_string())
}

/// Validate that an optional string, if present, is within the length limit
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate that a required field is present
pub fn require_value<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::validation(format!("Missing required field: {field}")))
}

/// Validate that a quantity is not negative
pub fn require_non_negative(value: i64, field: &str) -> Result<i64, AppError> {
    if value < 0 {
        return Err(AppError::validation(format!(
            "{field} must not be negative"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_rejects_missing_and_empty() {
        assert!(require_text(None, "name", MAX_NAME_LEN).is_err());
        assert!(require_text(Some(""), "name", MAX_NAME_LEN).is_err());
        assert!(require_text(Some("   "), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn require_text_trims_and_passes() {
        let v = require_text(Some("  Flour "), "name", MAX_NAME_LEN).unwrap();
        assert_eq!(v, "Flour");
    }

    #[test]
    fn require_text_enforces_length() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(require_text(Some(&long), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn non_negative_guard() {
        assert!(require_non_negative(-1, "qty_purchased").is_err());
        assert_eq!(require_non_negative(0, "qty_purchased").unwrap(), 0);
    }
}
