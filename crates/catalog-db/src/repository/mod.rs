//! # Repository Module
//!
//! SQLite access for the catalog, one repository per concern.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CatalogService                                                         │
//! │       │  CatalogStore trait                                             │
//! │       ▼                                                                 │
//! │  SqliteCatalogStore (catalog.rs)                                        │
//! │  ├── fetch_products   → ProductQuery rendered with QueryBuilder         │
//! │  ├── resolve_grade_ids ─► GradeRepository::resolve_ids                  │
//! │  ├── list_grades      ─► GradeRepository::list_all                      │
//! │  └── product_detail   ─► ProductRepository::detail                      │
//! │                                                                         │
//! │  GradeRepository / ProductRepository also carry the insert helpers     │
//! │  used by the seed binary and the tests.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SqliteCatalogStore`](catalog::SqliteCatalogStore) - Listing fetches
//! - [`GradeRepository`](grade::GradeRepository) - Grade reference data
//! - [`ProductRepository`](product::ProductRepository) - Product detail and writes

pub mod catalog;
pub mod grade;
pub mod product;
