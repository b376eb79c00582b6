//! # Catalog Store
//!
//! The seam between the query composer and whatever holds the catalog.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CatalogService<S: CatalogStore>                                        │
//! │       │                                                                 │
//! │       │  resolve_grade_ids(["BNIB"])        ← round trip 1 (optional)  │
//! │       │  fetch_products(&ProductQuery)      ← round trip 2             │
//! │       ▼                                                                 │
//! │  SqliteCatalogStore   (repository::catalog, production)                │
//! │  any other impl       (tests wrap it to count calls)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Implementations are plain readers: no caching, no retries. Errors are
//! returned as-is and the service hands them to its caller unchanged.

use std::future::Future;

use catalog_core::{Grade, GradeId, ProductDetail, ProductId, ProductQuery, ProductRow};

use crate::error::DbResult;

/// Read access to the catalog data.
pub trait CatalogStore: Send + Sync {
    /// Ids of the grades whose name equals one of `names` exactly.
    ///
    /// `names` are already normalized; an empty result is not an error.
    fn resolve_grade_ids(&self, names: &[String]) -> impl Future<Output = DbResult<Vec<GradeId>>> + Send;

    /// Runs one product fetch. Rows may repeat a product id (join fan-out).
    fn fetch_products(&self, query: &ProductQuery) -> impl Future<Output = DbResult<Vec<ProductRow>>> + Send;

    /// All grades, ordered by name.
    fn list_grades(&self) -> impl Future<Output = DbResult<Vec<Grade>>> + Send;

    /// Full detail for one product, `None` when the id is unknown.
    fn product_detail(&self, id: ProductId) -> impl Future<Output = DbResult<Option<ProductDetail>>> + Send;
}
