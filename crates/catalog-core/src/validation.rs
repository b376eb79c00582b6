//! # Validation Module
//!
//! Normalization of catalog input and validation of configured values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Two Kinds of Input                                 │
//! │                                                                         │
//! │  Per-request input (URL segments, search box, filter chips)            │
//! │  └── NORMALIZED, never rejected                                         │
//! │      unknown slug → empty listing, odd term → no match                  │
//! │                                                                         │
//! │  Configuration (catalog.toml brand entries)                             │
//! │  └── VALIDATED at startup, errors surface before serving               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};

/// Normalizes a URL slug: trimmed, lowercase.
///
/// ## Example
/// ```rust
/// use catalog_core::validation::normalize_slug;
///
/// assert_eq!(normalize_slug(" NewBalance "), "newbalance");
/// ```
pub fn normalize_slug(slug: &str) -> String {
    slug.trim().to_lowercase()
}

/// Normalizes a free-text search term (trimmed).
pub fn normalize_search_term(term: &str) -> String {
    term.trim().to_string()
}

/// Case folding shared by stored product names and search terms.
///
/// Unicode-aware, unlike SQLite's `LOWER()`.
pub fn fold_search_text(text: &str) -> String {
    text.to_lowercase()
}

/// Validates a configured slug.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must not contain whitespace or `/`
pub fn validate_slug(field: &str, slug: &str) -> ValidationResult<()> {
    let slug = slug.trim();

    if slug.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if slug.chars().any(|c| c.is_whitespace() || c == '/') {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must not contain whitespace or '/'".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_slug() {
        assert_eq!(normalize_slug("Running"), "running");
        assert_eq!(normalize_slug("  nike\n"), "nike");
        assert_eq!(normalize_slug(""), "");
    }

    #[test]
    fn test_normalize_search_term() {
        assert_eq!(normalize_search_term("  air max "), "air max");
    }

    #[test]
    fn test_fold_search_text() {
        assert_eq!(fold_search_text("ÉLAN RUNNER"), "élan runner");
        assert_eq!(fold_search_text("Élan"), fold_search_text("élan"));
        assert_eq!(fold_search_text("Gel-Kayano 14"), "gel-kayano 14");
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("slug", "nike").is_ok());
        assert!(validate_slug("slug", " nike ").is_ok());
        assert!(validate_slug("slug", "").is_err());
        assert!(validate_slug("slug", "new balance").is_err());
        assert!(validate_slug("slug", "men/running").is_err());
    }
}
