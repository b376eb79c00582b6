//! # Brand Directory
//!
//! Immutable slug → brand id lookup used to resolve the brand segment of a
//! catalog URL (`/nike`, `/newbalance`, ...).
//!
//! The directory is built once (from configuration or the built-in
//! defaults) and handed to the catalog service at construction time; it is
//! never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{ValidationError, ValidationResult};
use crate::types::BrandId;
use crate::validation::{normalize_slug, validate_slug};

/// One configured brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandEntry {
    /// URL segment, e.g. `newbalance`.
    pub slug: String,
    /// `brands.id` in the data store.
    pub id: BrandId,
    /// Display name; informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl BrandEntry {
    pub fn new(slug: impl Into<String>, id: BrandId) -> Self {
        BrandEntry {
            slug: slug.into(),
            id,
            name: None,
        }
    }
}

/// Brands the storefront ships with, in menu order.
pub fn default_brand_entries() -> Vec<BrandEntry> {
    [
        ("nike", "Nike"),
        ("adidas", "Adidas"),
        ("puma", "Puma"),
        ("reebok", "Reebok"),
        ("asics", "Asics"),
        ("newbalance", "New Balance"),
        ("converse", "Converse"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((slug, name), id)| BrandEntry {
        slug: slug.to_string(),
        id,
        name: Some(name.to_string()),
    })
    .collect()
}

/// Validated, read-only slug → id map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandDirectory {
    by_slug: HashMap<String, BrandId>,
    slugs: Vec<String>,
}

impl BrandDirectory {
    /// Builds a directory from configured entries.
    ///
    /// ## Errors
    /// - empty or malformed slug
    /// - duplicate slug (after normalization)
    /// - non-positive id
    pub fn from_entries(entries: &[BrandEntry]) -> ValidationResult<Self> {
        let mut by_slug = HashMap::with_capacity(entries.len());
        let mut slugs = Vec::with_capacity(entries.len());

        for entry in entries {
            validate_slug("brand slug", &entry.slug)?;
            let slug = normalize_slug(&entry.slug);

            if entry.id <= 0 {
                return Err(ValidationError::MustBePositive {
                    field: format!("brand id for '{}'", slug),
                });
            }

            if by_slug.insert(slug.clone(), entry.id).is_some() {
                return Err(ValidationError::Duplicate {
                    field: "brand slug".to_string(),
                    value: slug,
                });
            }
            slugs.push(slug);
        }

        Ok(BrandDirectory { by_slug, slugs })
    }

    /// Looks up a brand id by URL slug (case-insensitive, trimmed).
    pub fn resolve(&self, slug: &str) -> Option<BrandId> {
        self.by_slug.get(&normalize_slug(slug)).copied()
    }

    /// Whether `slug` names a configured brand.
    pub fn contains(&self, slug: &str) -> bool {
        self.resolve(slug).is_some()
    }

    /// Configured slugs in configuration order.
    pub fn slugs(&self) -> &[String] {
        &self.slugs
    }

    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }
}

impl Default for BrandDirectory {
    /// The built-in storefront brands (ids 1-7).
    fn default() -> Self {
        let entries = default_brand_entries();
        let by_slug = entries.iter().map(|e| (e.slug.clone(), e.id)).collect();
        let slugs = entries.into_iter().map(|e| e.slug).collect();
        BrandDirectory { by_slug, slugs }
    }
}
