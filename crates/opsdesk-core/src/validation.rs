//! # Validation Module
//!
//! Rules checked after a request body has deserialized but before the
//! database is touched.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: JSON extractor (axum + serde)                                │
//! │  ├── Missing fields, wrong types                                       │
//! │  └── Rejected with the extractor's status                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Stock counts must not be negative                                 │
//! │  └── QR identifiers must be safe file names                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── PRIMARY KEY uniqueness on every table                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::InventoryItem;
use crate::MAX_CODE_ID_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock count (quantity or threshold).
///
/// ## Example
/// ```rust
/// use opsdesk_core::validation::validate_stock_count;
///
/// assert!(validate_stock_count("quantity", 0).is_ok());
/// assert!(validate_stock_count("quantity", -1).is_err());
/// ```
pub fn validate_stock_count(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
            value,
        });
    }

    Ok(())
}

/// Validates an inventory item before insert.
pub fn validate_inventory_item(item: &InventoryItem) -> ValidationResult<()> {
    validate_stock_count("quantity", item.quantity)?;
    validate_stock_count("min_stock", item.min_stock)?;
    Ok(())
}

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates that an identifier can be used verbatim as `{id}.png`.
///
/// Any other string is accepted, including ids that are not in inventory.
///
/// ## Rules
/// - Must not be empty, `.` or `..`
/// - Must not contain `/`, `\` or NUL
/// - At most [`MAX_CODE_ID_LEN`] bytes
///
/// ## Example
/// ```rust
/// use opsdesk_core::validation::validate_code_id;
///
/// assert!(validate_code_id("X1").is_ok());
/// assert!(validate_code_id("dish kit #3").is_ok());
/// assert!(validate_code_id("../secrets").is_err());
/// ```
pub fn validate_code_id(id: &str) -> CoreResult<()> {
    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "item_id".to_string(),
        }
        .into());
    }

    let unsafe_id = |reason: &str| CoreError::UnsafeIdentifier {
        id: id.to_string(),
        reason: reason.to_string(),
    };

    if id == "." || id == ".." {
        return Err(unsafe_id("refers to a directory"));
    }

    if id.contains(['/', '\\']) {
        return Err(unsafe_id("contains a path separator"));
    }

    if id.contains('\0') {
        return Err(unsafe_id("contains a NUL byte"));
    }

    if id.len() > MAX_CODE_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "item_id".to_string(),
            max: MAX_CODE_ID_LEN,
        }
        .into());
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_stock_count() {
        assert!(validate_stock_count("quantity", 0).is_ok());
        assert!(validate_stock_count("quantity", 999_999).is_ok());
        assert!(validate_stock_count("quantity", -1).is_err());
    }

    #[test]
    fn test_validate_inventory_item_names_the_field() {
        let item = InventoryItem {
            id: "A".to_string(),
            name: "A".to_string(),
            quantity: 3,
            min_stock: -2,
        };
        let err = validate_inventory_item(&item).unwrap_err();
        assert!(matches!(err, ValidationError::Negative { ref field, value: -2 } if field == "min_stock"));
    }

    #[test]
    fn test_validate_code_id() {
        // Accepted as-is, whether or not such an item exists
        assert!(validate_code_id("X1").is_ok());
        assert!(validate_code_id("kit with spaces").is_ok());
        assert!(validate_code_id("..hidden").is_ok());

        assert!(validate_code_id("").is_err());
        assert!(validate_code_id(".").is_err());
        assert!(validate_code_id("..").is_err());
        assert!(validate_code_id("a/b").is_err());
        assert!(validate_code_id("a\\b").is_err());
        assert!(validate_code_id("a\0b").is_err());
        assert!(validate_code_id(&"x".repeat(MAX_CODE_ID_LEN + 1)).is_err());
    }
}
