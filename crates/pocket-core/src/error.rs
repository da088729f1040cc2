//! # Error Types
//!
//! Domain-specific error types for pocket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pocket-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - Form input rejected                            │
//! │  └── GeoError         - GeoJSON document could not be used             │
//! │                                                                         │
//! │  pocket-db errors (separate crate)                                     │
//! │  └── DbError          - Database / image file failures                 │
//! │                                                                         │
//! │  Terminal app errors                                                   │
//! │  └── AppError         - What the shell prints (serializable)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → shell output           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Most screens never surface an error: bad numbers become 0 and blank
//! orders are dropped. These types exist for the callers that want to know.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Order id is not in the list.
    #[error("Order not found: {0}")]
    OrderNotFound(u64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Map document error (wraps GeoError).
    #[error("Map error: {0}")]
    Geo(#[from] GeoError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Geo Error
// =============================================================================

/// Failures turning a GeoJSON document into overlays.
#[derive(Debug, Error)]
pub enum GeoError {
    /// The text is not JSON, or does not have a `features` array.
    #[error("Invalid feature collection: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// A known geometry type carries coordinates of the wrong shape.
    #[error("Feature {index} ({kind}): {reason}")]
    InvalidCoordinates {
        index: usize,
        kind: String,
        reason: String,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
