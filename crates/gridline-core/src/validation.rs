//! # Validation Module
//!
//! Checks the caller runs before dispatching a transition.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation                                                 │
//! │  ├── Disables Previous/Next at the ends                                │
//! │  └── Trims the "add column" input                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: gridline-host command                                        │
//! │  └── THIS MODULE: label, page and page-size rules                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: TableState transition                                        │
//! │  └── Total: unknown ids and duplicate columns are silent no-ops        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use gridline_core::validation::{validate_column_label, validate_page};
//!
//! assert_eq!(validate_column_label("  Department ").unwrap(), "Department");
//! assert!(validate_page(3, 2).is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_COLUMN_LABEL_LEN, MAX_ROWS_PER_PAGE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Column Validators
// =============================================================================

/// Validates a label from the "add column" form.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 64 characters
///
/// ## Returns
/// The trimmed label.
pub fn validate_column_label(label: &str) -> ValidationResult<String> {
    let label = label.trim();

    if label.is_empty() {
        return Err(ValidationError::Required {
            field: "column label".to_string(),
        });
    }

    if label.chars().count() > MAX_COLUMN_LABEL_LEN {
        return Err(ValidationError::TooLong {
            field: "column label".to_string(),
            max: MAX_COLUMN_LABEL_LEN,
        });
    }

    Ok(label.to_string())
}

// =============================================================================
// Pagination Validators
// =============================================================================

/// Validates a target page against the current page count.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed `total_pages` (page 1 is always allowed, even when the
///   result set is empty)
pub fn validate_page(page: usize, total_pages: usize) -> ValidationResult<()> {
    if page == 0 {
        return Err(ValidationError::MustBePositive {
            field: "page".to_string(),
        });
    }

    let max = total_pages.max(1);
    if page > max {
        return Err(ValidationError::OutOfRange {
            field: "page".to_string(),
            min: 1,
            max,
        });
    }

    Ok(())
}

/// Validates a configured page size.
///
/// ## Rules
/// - Must be positive
/// - At most 500
pub fn validate_rows_per_page(rows_per_page: usize) -> ValidationResult<()> {
    if rows_per_page == 0 {
        return Err(ValidationError::MustBePositive {
            field: "rows_per_page".to_string(),
        });
    }

    if rows_per_page > MAX_ROWS_PER_PAGE {
        return Err(ValidationError::OutOfRange {
            field: "rows_per_page".to_string(),
            min: 1,
            max: MAX_ROWS_PER_PAGE,
        });
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
    fn test_validate_column_label() {
        assert_eq!(validate_column_label("Department").unwrap(), "Department");
        assert_eq!(validate_column_label("  Start Date ").unwrap(), "Start Date");

        assert!(validate_column_label("").is_err());
        assert!(validate_column_label("   \t").is_err());
        assert!(validate_column_label(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_page() {
        assert!(validate_page(1, 2).is_ok());
        assert!(validate_page(2, 2).is_ok());
        assert!(validate_page(1, 0).is_ok());

        assert!(validate_page(0, 2).is_err());
        assert!(validate_page(3, 2).is_err());
    }

    #[test]
    fn test_validate_rows_per_page() {
        assert!(validate_rows_per_page(1).is_ok());
        assert!(validate_rows_per_page(10).is_ok());
        assert!(validate_rows_per_page(500).is_ok());

        assert!(validate_rows_per_page(0).is_err());
        assert!(validate_rows_per_page(501).is_err());
    }
}
