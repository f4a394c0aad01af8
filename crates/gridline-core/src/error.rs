//! # Error Types
//!
//! Domain-specific error types for gridline-core.
//!
//! ## Where Errors Live
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gridline-core (this file)                                             │
//! │  └── ValidationError  - caller-side checks before a transition          │
//! │                                                                         │
//! │  gridline-io (separate crate)                                          │
//! │  ├── ImportError      - file-level import failures                      │
//! │  └── ExportError      - export write failures                           │
//! │                                                                         │
//! │  gridline-host (app)                                                   │
//! │  └── ApiError         - what the presentation sees (serialized)         │
//! │                                                                         │
//! │  The store itself has no error channel: every transition is total.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are raised by [`crate::validation`] and never by the store. The
/// host runs the checks before dispatching a transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: usize, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "column label".to_string(),
        };
        assert_eq!(err.to_string(), "column label is required");

        let err = ValidationError::OutOfRange {
            field: "page".to_string(),
            min: 1,
            max: 2,
        };
        assert_eq!(err.to_string(), "page must be between 1 and 2");
    }
}
