//! # Grade Labels
//!
//! Pure half of the grade resolver: turns free-form labels from the filter
//! UI into the canonical names stored in the `grades` table. The id lookup
//! itself is a data store call (see `catalog-db`).
//!
//! ```text
//!   [" bnib", "Used ", "", "BNIB"]
//!            │ trim, uppercase, drop empty, dedupe
//!            ▼
//!   ["BNIB", "USED"]  ──►  SELECT id FROM grades WHERE name IN (...)
//! ```

/// Normalizes grade labels for an exact-name lookup.
///
/// Trims and uppercases every label, drops the ones that end up empty and
/// removes duplicates while keeping first-seen order.
///
/// ## Example
/// ```rust
/// use catalog_core::grade::normalize_grade_labels;
///
/// let labels = vec![" bnib".to_string(), "".to_string(), "BNIB".to_string()];
/// assert_eq!(normalize_grade_labels(&labels), vec!["BNIB".to_string()]);
/// ```
pub fn normalize_grade_labels<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(labels.len());

    for label in labels {
        let name = label.as_ref().trim().to_uppercase();
        if name.is_empty() || names.contains(&name) {
            continue;
        }
        names.push(name);
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_uppercases() {
        assert_eq!(
            normalize_grade_labels(&["  bnib ", "Vnds"]),
            vec!["BNIB".to_string(), "VNDS".to_string()]
        );
    }

    #[test]
    fn test_drops_empty_labels() {
        assert!(normalize_grade_labels(&["", "   ", "\t"]).is_empty());
        assert!(normalize_grade_labels::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_dedupes_after_normalizing() {
        assert_eq!(
            normalize_grade_labels(&["used", "USED", " Used", "bnib"]),
            vec!["USED".to_string(), "BNIB".to_string()]
        );
    }

    #[test]
    fn test_unknown_labels_survive_normalization() {
        // Whether a label exists is the lookup's business, not ours.
        assert_eq!(normalize_grade_labels(&["mint"]), vec!["MINT".to_string()]);
    }

    #[test]
    fn test_canonical_names_are_fixed_points() {
        for name in ["BNIB", "VNDS", "USED"] {
            assert_eq!(normalize_grade_labels(&[name]), vec![name.to_string()]);
        }
    }
}
