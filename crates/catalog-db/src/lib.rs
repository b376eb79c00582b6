//! # catalog-db: Data Store Layer for the Storefront Catalog
//!
//! Everything that touches the catalog database: the SQLite pool, schema
//! migrations, the listing store and the [`CatalogService`] that composes
//! brand, category and search listings.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Catalog Data Flow                        │
//! │                                                                         │
//! │  Listing page (brand / category / search, grade + price filters)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    catalog-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │CatalogService │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │ (catalog.rs)  │    │               │    │  (embedded)  │  │   │
//! │  │   │               │───►│ CatalogStore  │    │              │  │   │
//! │  │   │ compose query │    │ GradeRepo     │    │ 001_catalog_ │  │   │
//! │  │   │ map to cards  │    │ ProductRepo   │    │   schema.sql │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │  Database (pool.rs)          │   │
//! │  └────────────────────────────────┼────────────────────────────────┘   │
//! │                                   ▼                                     │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`catalog`] - The listing composer
//! - [`store`] - The `CatalogStore` seam
//! - [`repository`] - SQLite implementations
//! - [`pool`] - Connection pool creation and configuration
//! - [`config`] - `catalog.toml` loading
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database and config error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_core::CatalogFilters;
//! use catalog_db::{CatalogConfig, Database};
//!
//! let config = CatalogConfig::load(None)?;
//! let db = Database::new(config.db_config()).await?;
//! let catalog = db.catalog(config.brand_directory()?);
//!
//! let filters = CatalogFilters::none()
//!     .with_grades(["BNIB"])
//!     .with_price("1000000-3000000");
//! let cards = catalog.fetch_by_brand("nike", &filters).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::CatalogService;
pub use config::CatalogConfig;
pub use error::{ConfigError, DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::CatalogStore;

// Repository re-exports for convenience
pub use repository::catalog::SqliteCatalogStore;
pub use repository::grade::GradeRepository;
pub use repository::product::ProductRepository;
