//! # Error Types
//!
//! Domain-specific error types for catalog-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catalog-core errors (this file)                                       │
//! │  └── ValidationError  - Invalid brand directory / config entries       │
//! │                                                                         │
//! │  catalog-db errors (separate crate)                                    │
//! │  ├── DbError          - Data store failures                            │
//! │  └── ConfigError      - catalog.toml loading failures                  │
//! │                                                                         │
//! │  Flow: ValidationError → ConfigError → caller                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note what is NOT here: an unknown brand slug, a grade label that matches
//! nothing and an unrecognized price bucket are all legitimate empty or
//! permissive outcomes, never errors.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while building long-lived configuration values such as the
/// [`BrandDirectory`](crate::brand::BrandDirectory). Per-request catalog input
/// is never rejected.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Duplicate value (e.g., the same brand slug twice).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Invalid format (e.g., whitespace inside a slug).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
