//! # Product Repository
//!
//! Product detail reads and the write helpers used to load a catalog.
//!
//! ## Product Detail
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  detail(id)                                                             │
//! │                                                                         │
//! │  1. products ⋈ brands            → header (None → return None)          │
//! │  2. product_images               → urls, by display_order               │
//! │  3. stock_variants ⋈ grades      → variants, by id                      │
//! │  4. product_categories ⋈ categories → category refs, by name            │
//! │                                                                         │
//! │  Four small queries instead of one wide join: no fan-out to undo.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The listing path (brand / category / search) lives in
//! [`catalog`](super::catalog); this repository never filters by stock.

use sqlx::SqlitePool;
use tracing::debug;

use catalog_core::validation::fold_search_text;
use catalog_core::{BrandId, CategoryRef, GradeId, ProductDetail, ProductId, Rupiah, VariantDetail};

use crate::error::DbResult;

// =============================================================================
// Write DTOs
// =============================================================================

/// A product to insert.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub brand_id: Option<BrandId>,
    pub description: Option<String>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, brand_id: Option<BrandId>) -> Self {
        NewProduct {
            name: name.into(),
            brand_id,
            description: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A stock variant to insert.
#[derive(Debug, Clone)]
pub struct NewVariant {
    pub size: Option<String>,
    pub grade_id: Option<GradeId>,
    pub price: Rupiah,
    pub stock: i64,
}

impl NewVariant {
    pub fn new(size: impl Into<String>, grade_id: Option<GradeId>, price: i64, stock: i64) -> Self {
        NewVariant {
            size: Some(size.into()),
            grade_id,
            price: Rupiah::new(price),
            stock,
        }
    }
}

// =============================================================================
// Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct DetailHeader {
    id: ProductId,
    name: String,
    description: Option<String>,
    brand_name: Option<String>,
}

#[derive(sqlx::FromRow)]
struct DetailVariant {
    id: i64,
    size: Option<String>,
    grade: Option<String>,
    price: i64,
    stock: i64,
}

impl From<DetailVariant> for VariantDetail {
    fn from(row: DetailVariant) -> Self {
        VariantDetail {
            id: row.id,
            size: row.size,
            grade: row.grade,
            price: Rupiah::new(row.price),
            stock: row.stock,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product data.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let id = repo.insert(&NewProduct::new("Samba OG", Some(2))).await?;
/// repo.insert_variant(id, &NewVariant::new("42", Some(bnib), 1_800_000, 3)).await?;
///
/// let detail = repo.detail(id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Full detail for one product, `None` when the id is unknown.
    pub async fn detail(&self, id: ProductId) -> DbResult<Option<ProductDetail>> {
        let header = sqlx::query_as::<_, DetailHeader>(
            r#"
            SELECT p.id, p.name, p.description, b.name AS brand_name
            FROM products p
            LEFT JOIN brands b ON b.id = p.brand_id
            WHERE p.id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(header) = header else {
            debug!(product_id = id, "Product not found");
            return Ok(None);
        };

        let images: Vec<String> = sqlx::query_scalar(
            "SELECT image_url FROM product_images WHERE product_id = ?1 ORDER BY display_order, id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let variants = sqlx::query_as::<_, DetailVariant>(
            r#"
            SELECT v.id, v.size, g.name AS grade, v.price, v.stock
            FROM stock_variants v
            LEFT JOIN grades g ON g.id = v.grades_id
            WHERE v.product_id = ?1
            ORDER BY v.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let categories = sqlx::query_as::<_, CategoryRef>(
            r#"
            SELECT c.name, c.slug
            FROM product_categories pc
            INNER JOIN categories c ON c.id = pc.category_id
            WHERE pc.product_id = ?1
            ORDER BY c.name
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(ProductDetail {
            id: header.id,
            name: header.name,
            brand_name: header.brand_name,
            description: header.description,
            images,
            variants: variants.into_iter().map(VariantDetail::from).collect(),
            categories,
        }))
    }

    /// Inserts a brand with an explicit id (brand ids are referenced by the
    /// brand directory, so they are never generated).
    pub async fn insert_brand(&self, id: BrandId, name: &str) -> DbResult<()> {
        sqlx::query("INSERT INTO brands (id, name) VALUES (?1, ?2)")
            .bind(id)
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Inserts a category and returns its id.
    pub async fn insert_category(&self, name: &str, slug: &str) -> DbResult<i64> {
        let result = sqlx::query("INSERT INTO categories (name, slug) VALUES (?1, ?2)")
            .bind(name)
            .bind(slug)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Inserts a product and returns its id.
    pub async fn insert(&self, product: &NewProduct) -> DbResult<ProductId> {
        let result = sqlx::query(
            "INSERT INTO products (name, name_search, brand_id, description) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&product.name)
        .bind(fold_search_text(&product.name))
        .bind(product.brand_id)
        .bind(&product.description)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(product_id = id, name = %product.name, "Inserted product");
        Ok(id)
    }

    /// Inserts a stock variant and returns its id.
    pub async fn insert_variant(&self, product_id: ProductId, variant: &NewVariant) -> DbResult<i64> {
        let result = sqlx::query(
            "INSERT INTO stock_variants (product_id, size, grades_id, price, stock) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(product_id)
        .bind(&variant.size)
        .bind(variant.grade_id)
        .bind(variant.price.amount())
        .bind(variant.stock)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Attaches an image; `display_order` 1 is the primary image.
    pub async fn insert_image(&self, product_id: ProductId, image_url: &str, display_order: i64) -> DbResult<i64> {
        let result =
            sqlx::query("INSERT INTO product_images (product_id, image_url, display_order) VALUES (?1, ?2, ?3)")
                .bind(product_id)
                .bind(image_url)
                .bind(display_order)
                .execute(&self.pool)
                .await?;
        Ok(result.last_insert_rowid())
    }

    /// Lists a product under a category.
    pub async fn link_category(&self, product_id: ProductId, category_id: i64) -> DbResult<()> {
        sqlx::query("INSERT INTO product_categories (product_id, category_id) VALUES (?1, ?2)")
            .bind(product_id)
            .bind(category_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Total number of products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_detail_unknown_id() {
        let db = setup().await;
        assert_eq!(db.products().detail(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_detail_collects_children() {
        let db = setup().await;
        let repo = db.products();
        let bnib = db.grades().insert("BNIB").await.unwrap();
        let used = db.grades().insert("USED").await.unwrap();

        repo.insert_brand(1, "Nike").await.unwrap();
        let running = repo.insert_category("Running", "running").await.unwrap();
        let lifestyle = repo.insert_category("Lifestyle", "lifestyle").await.unwrap();

        let id = repo
            .insert(&NewProduct::new("Pegasus 41", Some(1)).description("Daily trainer"))
            .await
            .unwrap();
        repo.insert_image(id, "side.jpg", 2).await.unwrap();
        repo.insert_image(id, "front.jpg", 1).await.unwrap();
        repo.insert_variant(id, &NewVariant::new("42", Some(bnib), 2_100_000, 0))
            .await
            .unwrap();
        repo.insert_variant(id, &NewVariant::new("43", Some(used), 1_400_000, 2))
            .await
            .unwrap();
        repo.link_category(id, running).await.unwrap();
        repo.link_category(id, lifestyle).await.unwrap();

        let detail = repo.detail(id).await.unwrap().unwrap();
        assert_eq!(detail.name, "Pegasus 41");
        assert_eq!(detail.brand_name.as_deref(), Some("Nike"));
        assert_eq!(detail.description.as_deref(), Some("Daily trainer"));
        assert_eq!(detail.images, vec!["front.jpg", "side.jpg"]);
        assert_eq!(detail.variants.len(), 2);
        assert_eq!(detail.variants[0].grade.as_deref(), Some("BNIB"));
        assert_eq!(detail.variants[1].price, Rupiah::new(1_400_000));
        assert_eq!(detail.starting_price(), Some(Rupiah::new(1_400_000)));
        assert!(detail.in_stock());

        let slugs: Vec<&str> = detail.categories.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["lifestyle", "running"]);
    }

    #[tokio::test]
    async fn test_detail_without_brand_or_children() {
        let db = setup().await;
        let id = db.products().insert(&NewProduct::new("Unbranded", None)).await.unwrap();

        let detail = db.products().detail(id).await.unwrap().unwrap();
        assert_eq!(detail.brand_name, None);
        assert!(detail.images.is_empty());
        assert!(detail.variants.is_empty());
        assert_eq!(detail.starting_price(), None);
        assert!(!detail.in_stock());
    }

    #[tokio::test]
    async fn test_count() {
        let db = setup().await;
        let repo = db.products();
        assert_eq!(repo.count().await.unwrap(), 0);

        repo.insert(&NewProduct::new("A", None)).await.unwrap();
        repo.insert(&NewProduct::new("B", None)).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_variant_requires_existing_product() {
        let db = setup().await;
        let err = db
            .products()
            .insert_variant(42, &NewVariant::new("42", None, 100_000, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
