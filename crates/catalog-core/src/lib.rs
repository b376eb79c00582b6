//! # catalog-core: Pure Catalog Logic for the Storefront
//!
//! This crate decides *what* a catalog listing fetches and *how* the joined
//! rows become product cards. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Catalog Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront pages (web frontend)                 │   │
//! │  │    Brand page ──► Category page ──► Search page ──► Detail      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             catalog-db  CatalogService (composer)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ catalog-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   grade   │  │   price   │  │   query   │  │  mapper   │  │   │
//! │  │   │  labels   │  │  buckets  │  │ Scope +   │  │ rows →    │  │   │
//! │  │   │ normalize │  │ → ranges  │  │ predicates│  │ cards     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Joined rows, product cards, product detail
//! - [`grade`] - Grade label normalization
//! - [`price`] - Price buckets and their range predicates
//! - [`query`] - Scope, variant predicates, the `ProductQuery` builder
//! - [`mapper`] - Row → card fold
//! - [`brand`] - Brand slug directory
//! - [`route`] - Catalog URL resolution
//! - [`rupiah`] - Integer Rupiah price type
//! - [`validation`] - Slug/term normalization, config validation
//! - [`error`] - Validation error types
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::query::{CatalogFilters, ProductQuery, Scope};
//!
//! let filters = CatalogFilters::none().with_price("1000000-3000000");
//! let bucket = filters.price_bucket().unwrap();
//!
//! let query = ProductQuery::new(Scope::Brand(1), true, bucket.predicates());
//! assert!(query.is_stock_only());
//! assert_eq!(query.variant_predicates.len(), 3); // >=, <=, stock > 0
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod brand;
pub mod error;
pub mod grade;
pub mod mapper;
pub mod price;
pub mod query;
pub mod route;
pub mod rupiah;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use brand::{BrandDirectory, BrandEntry};
pub use error::ValidationError;
pub use mapper::map_products;
pub use price::PriceBucket;
pub use query::{CatalogFilters, ProductQuery, Scope};
pub use route::CatalogRoute;
pub use rupiah::Rupiah;
pub use types::*;
