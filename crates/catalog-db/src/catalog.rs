//! # Catalog Service
//!
//! Composes the catalog listings: brand, category and search pages, with
//! optional grade and price filters.
//!
//! ## One Listing Call
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetch_by_brand("nike", filters)                                        │
//! │       │                                                                 │
//! │       ├── slug unknown? ─────────────────────────────► Ok([])  (0 calls)│
//! │       ▼                                                                 │
//! │  filters active?                                                        │
//! │       │ no  ─► ProductQuery::unfiltered(scope)                          │
//! │       │ yes                                                             │
//! │       ├── grades given?                                                 │
//! │       │     normalize → nothing left? ───────────────► Ok([])  (0 calls)│
//! │       │     resolve_grade_ids ──► none? ─────────────► Ok([])  (1 call) │
//! │       │     push grades_id IN (ids)                                     │
//! │       ├── price bucket? push range predicates                           │
//! │       └── ProductQuery::new(scope, stock_only = true, predicates)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.fetch_products(&query) ──► map_products ──► Vec<ProductCard>     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! At most two sequential round trips per call. Store errors are returned
//! unchanged; there is no retry and no partial result.

use tracing::{debug, info};

use catalog_core::grade::normalize_grade_labels;
use catalog_core::price::apply_price_filter;
use catalog_core::query::VariantPredicate;
use catalog_core::validation::{normalize_search_term, normalize_slug};
use catalog_core::{
    map_products, BrandDirectory, CatalogFilters, CatalogRoute, Grade, ProductCard, ProductDetail, ProductId,
    ProductQuery, Scope,
};

use crate::error::DbResult;
use crate::store::CatalogStore;

/// Catalog listing operations over a [`CatalogStore`].
///
/// Holds no mutable state; clone it freely across tasks.
#[derive(Debug, Clone)]
pub struct CatalogService<S> {
    store: S,
    brands: BrandDirectory,
}

impl<S: CatalogStore> CatalogService<S> {
    /// Creates a service over `store` with a fixed brand directory.
    pub fn new(store: S, brands: BrandDirectory) -> Self {
        CatalogService { store, brands }
    }

    /// The brand directory this service resolves slugs against.
    pub fn brands(&self) -> &BrandDirectory {
        &self.brands
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // =========================================================================
    // Listings
    // =========================================================================

    /// Products of one brand, by URL slug.
    ///
    /// An unknown slug yields an empty list without touching the store.
    pub async fn fetch_by_brand(&self, slug: &str, filters: &CatalogFilters) -> DbResult<Vec<ProductCard>> {
        let Some(brand_id) = self.brands.resolve(slug) else {
            debug!(slug = %slug, "Unknown brand slug, empty listing");
            return Ok(Vec::new());
        };

        self.list(Scope::Brand(brand_id), filters).await
    }

    /// Products listed under a category slug.
    pub async fn fetch_by_category(&self, slug: &str, filters: &CatalogFilters) -> DbResult<Vec<ProductCard>> {
        self.list(Scope::Category(normalize_slug(slug)), filters).await
    }

    /// Products whose name contains `term`, case-insensitively.
    ///
    /// A blank term matches every product.
    pub async fn search(&self, term: &str, filters: &CatalogFilters) -> DbResult<Vec<ProductCard>> {
        self.list(Scope::NameContains(normalize_search_term(term)), filters)
            .await
    }

    /// Legacy search: no filters, products without stock included.
    pub async fn search_unfiltered(&self, term: &str) -> DbResult<Vec<ProductCard>> {
        self.search(term, &CatalogFilters::none()).await
    }

    /// Lists whatever the catalog URL `/{main}/{sub?}` points at.
    ///
    /// A known brand slug in `main` lists that brand; anything else is a
    /// category, `sub` taking precedence over `main`.
    pub async fn browse(&self, main: &str, sub: Option<&str>, filters: &CatalogFilters) -> DbResult<Vec<ProductCard>> {
        match CatalogRoute::resolve(&self.brands, main, sub) {
            CatalogRoute::Brand(slug) => self.fetch_by_brand(&slug, filters).await,
            CatalogRoute::Category(slug) => self.fetch_by_category(&slug, filters).await,
        }
    }

    // =========================================================================
    // Reference Data / Detail
    // =========================================================================

    /// All grades, ordered by name, for the filter sidebar.
    pub async fn grades(&self) -> DbResult<Vec<Grade>> {
        self.store.list_grades().await
    }

    /// Full detail for one product, `None` when the id is unknown.
    pub async fn product_detail(&self, id: ProductId) -> DbResult<Option<ProductDetail>> {
        self.store.product_detail(id).await
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Builds the product query for `scope` under `filters`.
    ///
    /// Returns `None` when the grade filter can match nothing, in which case
    /// no product fetch is needed.
    pub async fn compose(&self, scope: Scope, filters: &CatalogFilters) -> DbResult<Option<ProductQuery>> {
        if !filters.is_active() {
            return Ok(Some(ProductQuery::unfiltered(scope)));
        }

        let mut predicates = Vec::new();

        if filters.has_grades() {
            let names = normalize_grade_labels(&filters.grades);
            if names.is_empty() {
                debug!(scope = scope.kind(), "Grade labels blank after normalization");
                return Ok(None);
            }

            let ids = self.store.resolve_grade_ids(&names).await?;
            if ids.is_empty() {
                debug!(scope = scope.kind(), grades = ?names, "No grade matched");
                return Ok(None);
            }

            predicates.push(VariantPredicate::grade_in(ids));
        }

        apply_price_filter(&mut predicates, filters.price.as_deref());

        Ok(Some(ProductQuery::new(scope, true, predicates)))
    }

    async fn list(&self, scope: Scope, filters: &CatalogFilters) -> DbResult<Vec<ProductCard>> {
        let kind = scope.kind();

        let Some(query) = self.compose(scope, filters).await? else {
            return Ok(Vec::new());
        };

        let rows = self.store.fetch_products(&query).await?;
        let row_count = rows.len();
        let cards = map_products(rows);

        info!(
            scope = kind,
            stock_only = query.is_stock_only(),
            rows = row_count,
            products = cards.len(),
            "Catalog listing"
        );

        Ok(cards)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
