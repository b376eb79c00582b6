//! # Query Model
//!
//! A declarative description of one product fetch. The composer decides
//! *what* to fetch by building a [`ProductQuery`]; the data store decides
//! *how* by rendering it (SQL for SQLite, see `catalog-db`).
//!
//! ## Two Modes, One Builder
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductQuery::new(scope, stock_only, predicates)                      │
//! │                                                                         │
//! │  stock_only = false  (unfiltered, legacy listing)                      │
//! │    products ─LEFT JOIN─ stock_variants        no variant predicates    │
//! │    products without stock still listed (price = null)                  │
//! │                                                                         │
//! │  stock_only = true   (grade and/or price filter active)                │
//! │    products ─INNER JOIN─ stock_variants ON                             │
//! │        grades_id IN (...)     ← grade filter                           │
//! │        price  <, >=, <=, >    ← price bucket                           │
//! │        stock  > 0             ← always                                 │
//! │    only products with a matching in-stock variant survive              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::price::PriceBucket;
use crate::types::{BrandId, GradeId, VariantRow};

// =============================================================================
// Scope
// =============================================================================

/// Which products a query considers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// `products.brand_id = id`.
    Brand(BrandId),
    /// Products linked to the category with this slug.
    Category(String),
    /// Case-insensitive substring match on the product name.
    NameContains(String),
}

impl Scope {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Scope::Brand(_) => "brand",
            Scope::Category(_) => "category",
            Scope::NameContains(_) => "search",
        }
    }
}

// =============================================================================
// Predicates
// =============================================================================

/// Join semantics for the variant relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// Parent row kept even without a matching variant.
    Left,
    /// Parent row dropped unless a variant matches.
    Inner,
}

/// Filterable columns of `stock_variants`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantField {
    Price,
    Stock,
    GradeId,
}

impl VariantField {
    /// Column name in the `stock_variants` table.
    pub fn column(&self) -> &'static str {
        match self {
            VariantField::Price => "price",
            VariantField::Stock => "stock",
            VariantField::GradeId => "grades_id",
        }
    }
}

/// Comparison applied to a variant column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Eq(i64),
    In(Vec<i64>),
    Gt(i64),
    Gte(i64),
    Lt(i64),
    Lte(i64),
}

impl Condition {
    /// Evaluates the comparison against a column value.
    ///
    /// A NULL column (`None`) matches nothing, as in SQL.
    pub fn matches(&self, value: Option<i64>) -> bool {
        let Some(v) = value else {
            return false;
        };

        match self {
            Condition::Eq(x) => v == *x,
            Condition::In(xs) => xs.contains(&v),
            Condition::Gt(x) => v > *x,
            Condition::Gte(x) => v >= *x,
            Condition::Lt(x) => v < *x,
            Condition::Lte(x) => v <= *x,
        }
    }
}

/// A predicate on the variant join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantPredicate {
    pub field: VariantField,
    pub condition: Condition,
}

impl VariantPredicate {
    pub fn new(field: VariantField, condition: Condition) -> Self {
        VariantPredicate { field, condition }
    }

    /// `grades_id IN (ids)`.
    pub fn grade_in(ids: Vec<GradeId>) -> Self {
        VariantPredicate::new(VariantField::GradeId, Condition::In(ids))
    }

    /// `stock > 0`.
    pub fn in_stock() -> Self {
        VariantPredicate::new(VariantField::Stock, Condition::Gt(0))
    }

    /// Evaluates the predicate against one variant.
    pub fn matches(&self, variant: &VariantRow) -> bool {
        let value = match self.field {
            VariantField::Price => Some(variant.price.amount()),
            VariantField::Stock => Some(variant.stock),
            VariantField::GradeId => variant.grade_id,
        };
        self.condition.matches(value)
    }
}

// =============================================================================
// Product Query
// =============================================================================

/// One product fetch, ready to be rendered by a data store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub scope: Scope,
    pub variant_join: JoinKind,
    pub variant_predicates: Vec<VariantPredicate>,
}

impl ProductQuery {
    /// Builds a query for `scope`.
    ///
    /// With `stock_only` the variant relation is inner-joined and
    /// `stock > 0` is appended to `predicates`; without it the relation is
    /// left-joined and `predicates` must be empty (the legacy listing has no
    /// variant conditions).
    pub fn new(scope: Scope, stock_only: bool, mut predicates: Vec<VariantPredicate>) -> Self {
        if stock_only {
            predicates.push(VariantPredicate::in_stock());
            ProductQuery {
                scope,
                variant_join: JoinKind::Inner,
                variant_predicates: predicates,
            }
        } else {
            debug_assert!(predicates.is_empty(), "unfiltered fetch takes no predicates");
            ProductQuery {
                scope,
                variant_join: JoinKind::Left,
                variant_predicates: Vec::new(),
            }
        }
    }

    /// Legacy broad fetch: every product in scope with all its variants.
    pub fn unfiltered(scope: Scope) -> Self {
        ProductQuery::new(scope, false, Vec::new())
    }

    /// Whether this is the stock-only (filtered) mode.
    pub fn is_stock_only(&self) -> bool {
        self.variant_join == JoinKind::Inner
    }

    /// Whether a variant would survive the variant join conditions.
    pub fn accepts_variant(&self, variant: &VariantRow) -> bool {
        self.variant_predicates.iter().all(|p| p.matches(variant))
    }
}

// =============================================================================
// Catalog Filters
// =============================================================================

/// Optional filters a listing page passes alongside its scope.
///
/// Raw UI values are kept as given; interpretation happens here so every
/// entry point agrees on what "a filter is active" means.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilters {
    /// Grade labels (e.g. `["BNIB", "VNDS"]`).
    pub grades: Vec<String>,
    /// Price bucket key (e.g. `"1000000-3000000"`).
    pub price: Option<String>,
}

impl CatalogFilters {
    /// No filters at all.
    pub fn none() -> Self {
        CatalogFilters::default()
    }

    /// Filters on grade labels.
    pub fn with_grades<I, S>(mut self, grades: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.grades = grades.into_iter().map(Into::into).collect();
        self
    }

    /// Filters on a price bucket key.
    pub fn with_price(mut self, key: impl Into<String>) -> Self {
        self.price = Some(key.into());
        self
    }

    /// Whether any grade label was supplied.
    ///
    /// Labels that normalize to nothing still count: the caller asked for a
    /// grade filter, it just cannot match.
    pub fn has_grades(&self) -> bool {
        !self.grades.is_empty()
    }

    /// The recognized price bucket, if any.
    pub fn price_bucket(&self) -> Option<PriceBucket> {
        self.price.as_deref().and_then(PriceBucket::from_key)
    }

    /// Whether a non-blank price key was supplied, recognized or not.
    pub fn has_price(&self) -> bool {
        self.price.as_deref().is_some_and(|key| !key.trim().is_empty())
    }

    /// Whether the stock-only mode applies.
    ///
    /// An unrecognized price key still switches to stock-only; it just adds
    /// no range predicate.
    pub fn is_active(&self) -> bool {
        self.has_grades() || self.has_price()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rupiah::Rupiah;

    fn variant(price: i64, stock: i64, grade_id: Option<i64>) -> VariantRow {
        VariantRow {
            price: Rupiah::new(price),
            stock,
            grade_id,
        }
    }

    #[test]
    fn test_unfiltered_query_is_left_join_without_predicates() {
        let q = ProductQuery::unfiltered(Scope::Brand(1));
        assert_eq!(q.variant_join, JoinKind::Left);
        assert!(q.variant_predicates.is_empty());
        assert!(!q.is_stock_only());

        // Out-of-stock variants stay attached in the legacy listing.
        assert!(q.accepts_variant(&variant(500_000, 0, None)));
    }

    #[test]
    fn test_stock_only_appends_stock_predicate() {
        let q = ProductQuery::new(
            Scope::NameContains("dunk".to_string()),
            true,
            vec![VariantPredicate::grade_in(vec![1])],
        );
        assert_eq!(q.variant_join, JoinKind::Inner);
        assert_eq!(q.variant_predicates.len(), 2);
        assert_eq!(q.variant_predicates[1], VariantPredicate::in_stock());

        assert!(q.accepts_variant(&variant(500_000, 3, Some(1))));
        assert!(!q.accepts_variant(&variant(500_000, 0, Some(1))));
        assert!(!q.accepts_variant(&variant(500_000, 3, Some(2))));
    }

    #[test]
    fn test_null_grade_never_matches() {
        let p = VariantPredicate::grade_in(vec![1, 2, 3]);
        assert!(!p.matches(&variant(100, 1, None)));
    }

    #[test]
    fn test_conditions() {
        assert!(Condition::Eq(5).matches(Some(5)));
        assert!(!Condition::Eq(5).matches(Some(6)));
        assert!(Condition::In(vec![1, 3]).matches(Some(3)));
        assert!(!Condition::In(vec![]).matches(Some(3)));
        assert!(Condition::Gt(0).matches(Some(1)));
        assert!(!Condition::Gt(0).matches(Some(0)));
        assert!(Condition::Gte(10).matches(Some(10)));
        assert!(Condition::Lt(10).matches(Some(9)));
        assert!(Condition::Lte(10).matches(Some(10)));
        assert!(!Condition::Lte(10).matches(None));
    }

    #[test]
    fn test_filters_activity() {
        assert!(!CatalogFilters::none().is_active());
        assert!(CatalogFilters::none().with_grades(["BNIB"]).is_active());
        assert!(CatalogFilters::none().with_price("gt-3000000").is_active());

        // Unrecognized bucket key: stock-only, but no range.
        let unknown = CatalogFilters::none().with_price("cheap");
        assert!(unknown.is_active());
        assert_eq!(unknown.price_bucket(), None);

        // Blank key is the same as no key.
        assert!(!CatalogFilters::none().with_price("  ").is_active());

        // Blank labels still request a grade filter.
        assert!(CatalogFilters::none().with_grades(["  "]).is_active());
    }

    #[test]
    fn test_scope_kind() {
        assert_eq!(Scope::Brand(1).kind(), "brand");
        assert_eq!(Scope::Category("running".into()).kind(), "category");
        assert_eq!(Scope::NameContains("air".into()).kind(), "search");
    }
}
