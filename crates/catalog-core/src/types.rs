//! # Domain Types
//!
//! Types shared by the query composer, the data store and the callers.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  What the data store returns (one per joined row, fan-out allowed):     │
//! │  ┌──────────────────────────────────────────────────────────────┐      │
//! │  │ ProductRow                                                   │      │
//! │  │  id, name, brand_id                                          │      │
//! │  │  brand:      Option<BrandRef>                                │      │
//! │  │  images:     Vec<ImageRow>      (order, image_url)           │      │
//! │  │  variants:   Vec<VariantRow>    (price, stock, grade_id)     │      │
//! │  │  categories: Vec<CategorySlug>  (slug)                       │      │
//! │  └──────────────────────────────────────────────────────────────┘      │
//! │                         │  mapper::map_products                         │
//! │                         ▼                                               │
//! │  What callers receive (exactly one per product):                        │
//! │  ┌──────────────────────────────────────────────────────────────┐      │
//! │  │ ProductCard                                                  │      │
//! │  │  id, name, brand_name, image_url, price, categories          │      │
//! │  └──────────────────────────────────────────────────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nested collections are plain `Vec`s: an outer join with no match yields an
//! empty list, never a missing field.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::rupiah::Rupiah;

// =============================================================================
// Identifiers
// =============================================================================

/// Numeric product identifier.
pub type ProductId = i64;

/// Numeric brand identifier.
pub type BrandId = i64;

/// Numeric grade identifier (`stock_variants.grades_id`).
pub type GradeId = i64;

// =============================================================================
// Joined Rows
// =============================================================================

/// Brand columns joined onto a product row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandRef {
    pub name: String,
}

/// One image joined onto a product row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRow {
    /// 1-based display order; order 1 is the primary image.
    pub order: i64,
    pub image_url: String,
}

/// One stock variant joined onto a product row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRow {
    pub price: Rupiah,
    pub stock: i64,
    pub grade_id: Option<GradeId>,
}

impl VariantRow {
    /// Whether at least one unit is available.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// One category slug joined onto a product row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySlug {
    pub slug: String,
}

/// A product as returned by the data store for one fetch.
///
/// The store may return several rows for the same product id (join
/// fan-out); the mapper folds them back together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub brand_id: Option<BrandId>,
    pub brand: Option<BrandRef>,
    pub images: Vec<ImageRow>,
    pub variants: Vec<VariantRow>,
    pub categories: Vec<CategorySlug>,
}

// =============================================================================
// Uniform Product Record
// =============================================================================

/// The uniform product record handed to listing pages.
///
/// The shape is the same for brand, category and search listings, filtered
/// or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub brand_name: Option<String>,
    /// Primary image (order 1), else the first image found.
    pub image_url: Option<String>,
    /// Minimum price among in-stock variants.
    pub price: Option<Rupiah>,
    /// Distinct category slugs.
    pub categories: Vec<String>,
}

impl ProductCard {
    /// Display label for the price, e.g. `Rp 1.500.000`.
    ///
    /// `None` when no variant is in stock; the listing then shows its
    /// "pick a variant" fallback instead of a price.
    pub fn price_label(&self) -> Option<String> {
        self.price.map(|p| p.to_string())
    }
}

// =============================================================================
// Reference Data
// =============================================================================

/// A condition grade (BNIB, VNDS, USED, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Grade {
    pub id: GradeId,
    pub name: String,
}

/// A category a product is listed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct CategoryRef {
    pub name: String,
    pub slug: String,
}

// =============================================================================
// Product Detail
// =============================================================================

/// One purchasable variant on the product detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantDetail {
    pub id: i64,
    pub size: Option<String>,
    pub grade: Option<String>,
    pub price: Rupiah,
    pub stock: i64,
}

/// Everything the product detail page shows for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductDetail {
    pub id: ProductId,
    pub name: String,
    pub brand_name: Option<String>,
    pub description: Option<String>,
    /// Image URLs sorted by display order.
    pub images: Vec<String>,
    /// Variants sorted by id.
    pub variants: Vec<VariantDetail>,
    pub categories: Vec<CategoryRef>,
}

impl ProductDetail {
    /// Lowest price across all variants, shown before a size/grade is
    /// picked. Stock is not considered here.
    pub fn starting_price(&self) -> Option<Rupiah> {
        self.variants.iter().map(|v| v.price).min()
    }

    /// Whether any variant can be added to the cart.
    pub fn in_stock(&self) -> bool {
        self.variants.iter().any(|v| v.stock > 0)
    }

    /// Variants matching a size and grade selection.
    ///
    /// `None` for either side means "not chosen yet" and matches everything.
    pub fn variants_for(&self, size: Option<&str>, grade: Option<&str>) -> Vec<&VariantDetail> {
        self.variants
            .iter()
            .filter(|v| size.map_or(true, |s| v.size.as_deref() == Some(s)))
            .filter(|v| grade.map_or(true, |g| v.grade.as_deref() == Some(g)))
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(id: i64, size: &str, grade: &str, price: i64, stock: i64) -> VariantDetail {
        VariantDetail {
            id,
            size: Some(size.to_string()),
            grade: Some(grade.to_string()),
            price: Rupiah::new(price),
            stock,
        }
    }

    fn detail() -> ProductDetail {
        ProductDetail {
            id: 1,
            name: "Air Jordan 1 High".to_string(),
            brand_name: Some("Nike".to_string()),
            description: None,
            images: vec![],
            variants: vec![
                variant(10, "42", "BNIB", 2_500_000, 0),
                variant(11, "42", "USED", 1_200_000, 1),
                variant(12, "43", "BNIB", 2_700_000, 2),
            ],
            categories: vec![],
        }
    }

    #[test]
    fn test_price_label() {
        let mut card = ProductCard {
            id: 1,
            name: "Samba OG".to_string(),
            brand_name: Some("Adidas".to_string()),
            image_url: None,
            price: Some(Rupiah::new(1_500_000)),
            categories: vec![],
        };
        assert_eq!(card.price_label().as_deref(), Some("Rp 1.500.000"));

        card.price = None;
        assert_eq!(card.price_label(), None);
    }

    #[test]
    fn test_starting_price_ignores_stock() {
        assert_eq!(detail().starting_price(), Some(Rupiah::new(1_200_000)));
    }

    #[test]
    fn test_in_stock() {
        let mut d = detail();
        assert!(d.in_stock());

        for v in &mut d.variants {
            v.stock = 0;
        }
        assert!(!d.in_stock());
    }

    #[test]
    fn test_variants_for_selection() {
        let d = detail();

        let ids: Vec<i64> = d.variants_for(Some("42"), None).iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![10, 11]);

        let ids: Vec<i64> = d
            .variants_for(Some("42"), Some("BNIB"))
            .iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec![10]);

        assert_eq!(d.variants_for(None, None).len(), 3);
        assert!(d.variants_for(Some("44"), None).is_empty());
    }

    #[test]
    fn test_card_json_shape() {
        let card = ProductCard {
            id: 7,
            name: "Suede Classic".to_string(),
            brand_name: Some("Puma".to_string()),
            image_url: Some("https://cdn.example/suede-1.jpg".to_string()),
            price: Some(Rupiah::new(900_000)),
            categories: vec!["sneakers".to_string()],
        };

        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["price"], 900_000);
        assert_eq!(value["brand_name"], "Puma");
        assert_eq!(value["categories"][0], "sneakers");
    }
}
