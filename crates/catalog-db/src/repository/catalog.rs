//! # Catalog Listing Store
//!
//! Renders a [`ProductQuery`] to SQL and returns one row per product and
//! matching variant.
//!
//! ## Rendered Shape
//! ```text
//! SELECT product, brand, variant columns,
//!        (json_group_array of the product's images)      AS images_json,
//!        (json_group_array of the product's category slugs) AS categories_json
//! FROM products p
//! LEFT  JOIN brands b                ON b.id = p.brand_id
//! {INNER|LEFT} JOIN stock_variants v ON v.product_id = p.id
//!                                   [AND v.grades_id IN (?, ?)]
//!                                   [AND v.price >= ? AND v.price <= ?]
//!                                   [AND v.stock > ?]
//! WHERE <scope>
//! ORDER BY p.id, v.id
//! ```
//!
//! The variant join is the only join that multiplies rows. Images and
//! categories come back as JSON arrays from correlated subqueries, so a
//! product with 10 variants, 10 images and 5 categories is 10 rows, not 500.
//!
//! Variant predicates sit in the join condition, not in WHERE: with a LEFT
//! join that keeps variant-less products, with an INNER join it drops
//! products that have no matching variant. Every value is bound, never
//! formatted into the SQL text.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use catalog_core::query::{Condition, JoinKind, VariantPredicate};
use catalog_core::validation::fold_search_text;
use catalog_core::{
    BrandRef, CategorySlug, Grade, GradeId, ImageRow, ProductDetail, ProductId, ProductQuery, ProductRow, Rupiah,
    Scope, VariantRow,
};

use crate::error::{DbError, DbResult};
use crate::repository::grade::GradeRepository;
use crate::repository::product::ProductRepository;
use crate::store::CatalogStore;

const PRODUCT_LISTING_SELECT: &str = r#"
SELECT
    p.id            AS product_id,
    p.name          AS product_name,
    p.brand_id      AS brand_id,
    b.name          AS brand_name,
    v.id            AS variant_id,
    v.price         AS variant_price,
    v.stock         AS variant_stock,
    v.grades_id     AS variant_grade_id,
    (SELECT json_group_array(json_array(i.display_order, i.image_url))
       FROM product_images i
      WHERE i.product_id = p.id) AS images_json,
    (SELECT json_group_array(c.slug)
       FROM product_categories pc
      INNER JOIN categories c ON c.id = pc.category_id
      WHERE pc.product_id = p.id) AS categories_json
FROM products p
LEFT JOIN brands b ON b.id = p.brand_id
"#;

/// One row of the listing query: a product and at most one variant.
#[derive(Debug, sqlx::FromRow)]
struct ListingRow {
    product_id: ProductId,
    product_name: String,
    brand_id: Option<i64>,
    brand_name: Option<String>,
    variant_id: Option<i64>,
    variant_price: Option<i64>,
    variant_stock: Option<i64>,
    variant_grade_id: Option<GradeId>,
    images_json: String,
    categories_json: String,
}

impl ListingRow {
    fn variants(&self) -> Vec<VariantRow> {
        match (self.variant_id, self.variant_price) {
            (Some(_), Some(price)) => vec![VariantRow {
                price: Rupiah::new(price),
                stock: self.variant_stock.unwrap_or(0),
                grade_id: self.variant_grade_id,
            }],
            _ => Vec::new(),
        }
    }

    /// Images sorted by display order.
    fn images(&self) -> DbResult<Vec<ImageRow>> {
        let mut images: Vec<(i64, String)> = decode_json("images_json", &self.images_json)?;
        images.sort_by_key(|(order, _)| *order);
        Ok(images
            .into_iter()
            .map(|(order, image_url)| ImageRow { order, image_url })
            .collect())
    }

    /// Category slugs, sorted.
    fn categories(&self) -> DbResult<Vec<CategorySlug>> {
        let mut slugs: Vec<String> = decode_json("categories_json", &self.categories_json)?;
        slugs.sort_unstable();
        Ok(slugs.into_iter().map(|slug| CategorySlug { slug }).collect())
    }
}

fn decode_json<T: serde::de::DeserializeOwned>(column: &str, raw: &str) -> DbResult<T> {
    serde_json::from_str(raw).map_err(|e| DbError::QueryFailed(format!("malformed {}: {}", column, e)))
}

/// Converts listing rows to product rows.
///
/// Images and categories are decoded once per product and attached to its
/// first row; later rows of the same product carry only their variant.
fn into_product_rows(rows: Vec<ListingRow>) -> DbResult<Vec<ProductRow>> {
    let mut products = Vec::with_capacity(rows.len());
    let mut previous: Option<ProductId> = None;

    for row in rows {
        let first_of_product = previous != Some(row.product_id);
        previous = Some(row.product_id);

        let (images, categories) = if first_of_product {
            (row.images()?, row.categories()?)
        } else {
            (Vec::new(), Vec::new())
        };

        products.push(ProductRow {
            id: row.product_id,
            variants: row.variants(),
            name: row.product_name,
            brand_id: row.brand_id,
            brand: row.brand_name.map(|name| BrandRef { name }),
            images,
            categories,
        });
    }

    Ok(products)
}

// =============================================================================
// SQL Rendering
// =============================================================================

/// Builds the listing SQL for `query`, with all values bound.
pub(crate) fn build_listing_query(query: &ProductQuery) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::new(PRODUCT_LISTING_SELECT);

    qb.push(match query.variant_join {
        JoinKind::Inner => "INNER JOIN",
        JoinKind::Left => "LEFT JOIN",
    });
    qb.push(" stock_variants v ON v.product_id = p.id");
    for predicate in &query.variant_predicates {
        qb.push(" AND ");
        push_variant_predicate(&mut qb, predicate);
    }

    qb.push("\nWHERE ");
    push_scope(&mut qb, &query.scope);

    qb.push("\nORDER BY p.id, v.id");
    qb
}

fn push_variant_predicate(qb: &mut QueryBuilder<'static, Sqlite>, predicate: &VariantPredicate) {
    let column = format!("v.{}", predicate.field.column());

    let (op, value) = match &predicate.condition {
        Condition::In(values) => {
            if values.is_empty() {
                // IN () matches nothing
                qb.push("0 = 1");
                return;
            }
            qb.push(column).push(" IN (");
            let mut separated = qb.separated(", ");
            for value in values {
                separated.push_bind(*value);
            }
            separated.push_unseparated(")");
            return;
        }
        Condition::Eq(v) => ("=", *v),
        Condition::Gt(v) => (">", *v),
        Condition::Gte(v) => (">=", *v),
        Condition::Lt(v) => ("<", *v),
        Condition::Lte(v) => ("<=", *v),
    };

    qb.push(column).push(" ").push(op).push(" ").push_bind(value);
}

fn push_scope(qb: &mut QueryBuilder<'static, Sqlite>, scope: &Scope) {
    match scope {
        Scope::Brand(brand_id) => {
            qb.push("p.brand_id = ").push_bind(*brand_id);
        }
        Scope::Category(slug) => {
            qb.push(
                "p.id IN (SELECT pc2.product_id FROM product_categories pc2 \
                 INNER JOIN categories c2 ON c2.id = pc2.category_id WHERE c2.slug = ",
            )
            .push_bind(slug.clone())
            .push(")");
        }
        Scope::NameContains(term) => {
            // name_search holds the Unicode-folded name; LOWER() only
            // covers rows written before it existed.
            qb.push("COALESCE(p.name_search, LOWER(p.name)) LIKE ")
                .push_bind(like_pattern(term))
                .push(" ESCAPE '\\'");
        }
    }
}

/// `%term%`, folded, with LIKE wildcards in the term escaped.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in fold_search_text(term).chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

// =============================================================================
// Store
// =============================================================================

/// The SQLite-backed [`CatalogStore`].
#[derive(Debug, Clone)]
pub struct SqliteCatalogStore {
    pool: SqlitePool,
}

impl SqliteCatalogStore {
    /// Creates a new SqliteCatalogStore.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteCatalogStore { pool }
    }

    fn grades(&self) -> GradeRepository {
        GradeRepository::new(self.pool.clone())
    }

    fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }
}

impl CatalogStore for SqliteCatalogStore {
    async fn resolve_grade_ids(&self, names: &[String]) -> DbResult<Vec<GradeId>> {
        self.grades().resolve_ids(names).await
    }

    async fn fetch_products(&self, query: &ProductQuery) -> DbResult<Vec<ProductRow>> {
        let mut qb = build_listing_query(query);
        let rows: Vec<ListingRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        let row_count = rows.len();

        debug!(
            scope = query.scope.kind(),
            stock_only = query.is_stock_only(),
            predicates = query.variant_predicates.len(),
            rows = row_count,
            "Fetched listing rows"
        );

        into_product_rows(rows)
    }

    async fn list_grades(&self) -> DbResult<Vec<Grade>> {
        self.grades().list_all().await
    }

    async fn product_detail(&self, id: ProductId) -> DbResult<Option<ProductDetail>> {
        self.products().detail(id).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::PriceBucket;
    use crate::pool::{Database, DbConfig};
    use crate::repository::product::{NewProduct, NewVariant};

    #[test]
    fn test_unfiltered_sql_left_joins_without_predicates() {
        let qb = build_listing_query(&ProductQuery::unfiltered(Scope::Brand(1)));
        let sql = qb.sql();

        assert!(sql.contains("LEFT JOIN stock_variants v ON v.product_id = p.id\n"));
        assert!(!sql.contains(" AND "));
        assert!(sql.contains("WHERE p.brand_id = ?"));
    }

    #[test]
    fn test_filtered_sql_puts_predicates_on_join() {
        let mut predicates = vec![VariantPredicate::grade_in(vec![1, 2])];
        predicates.extend(PriceBucket::From1MTo3M.predicates());
        let query = ProductQuery::new(Scope::Category("running".to_string()), true, predicates);

        let qb = build_listing_query(&query);
        let sql = qb.sql();

        assert!(sql.contains(
            "INNER JOIN stock_variants v ON v.product_id = p.id \
             AND v.grades_id IN (?, ?) AND v.price >= ? AND v.price <= ? AND v.stock > ?"
        ));
        assert!(sql.contains("WHERE p.id IN (SELECT pc2.product_id"));
        assert!(sql.ends_with("ORDER BY p.id, v.id"));
    }

    #[test]
    fn test_only_variants_are_joined() {
        let qb = build_listing_query(&ProductQuery::unfiltered(Scope::Brand(1)));
        let sql = qb.sql();

        assert!(!sql.contains("JOIN product_images"));
        assert!(!sql.contains("LEFT JOIN product_categories"));
        assert!(sql.contains("json_group_array(json_array(i.display_order, i.image_url))"));
        assert!(sql.contains("json_group_array(c.slug)"));
    }

    #[test]
    fn test_search_scope_matches_folded_name() {
        let qb = build_listing_query(&ProductQuery::unfiltered(Scope::NameContains("air".to_string())));
        assert!(qb
            .sql()
            .contains("WHERE COALESCE(p.name_search, LOWER(p.name)) LIKE ? ESCAPE '\\'"));
    }

    #[test]
    fn test_empty_in_matches_nothing() {
        let query = ProductQuery::new(Scope::Brand(1), true, vec![VariantPredicate::grade_in(vec![])]);
        let qb = build_listing_query(&query);
        assert!(qb.sql().contains("AND 0 = 1"));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Air Max"), "%air max%");
        assert_eq!(like_pattern("100%_x"), "%100\\%\\_x%");
        assert_eq!(like_pattern("ÉLAN"), "%élan%");
    }

    #[test]
    fn test_malformed_aggregate_is_query_error() {
        let row = ListingRow {
            product_id: 1,
            product_name: "Vomero 5".to_string(),
            brand_id: None,
            brand_name: None,
            variant_id: None,
            variant_price: None,
            variant_stock: None,
            variant_grade_id: None,
            images_json: "not json".to_string(),
            categories_json: "[]".to_string(),
        };

        assert!(matches!(into_product_rows(vec![row]), Err(DbError::QueryFailed(_))));
    }

    async fn seeded() -> (Database, ProductId) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let products = db.products();
        let bnib = db.grades().insert("BNIB").await.unwrap();

        products.insert_brand(1, "Nike").await.unwrap();
        let running = products.insert_category("Running", "running").await.unwrap();
        let sale = products.insert_category("Sale", "sale").await.unwrap();

        let id = products.insert(&NewProduct::new("Vomero 5", Some(1))).await.unwrap();
        products.insert_image(id, "a.jpg", 1).await.unwrap();
        products.insert_image(id, "b.jpg", 2).await.unwrap();
        products
            .insert_variant(id, &NewVariant::new("42", Some(bnib), 2_000_000, 1))
            .await
            .unwrap();
        products.link_category(id, running).await.unwrap();
        products.link_category(id, sale).await.unwrap();

        (db, id)
    }

    #[tokio::test]
    async fn test_fetch_returns_one_row_per_variant() {
        let (db, id) = seeded().await;
        let store = db.catalog_store();

        let rows = store
            .fetch_products(&ProductQuery::unfiltered(Scope::Brand(1)))
            .await
            .unwrap();

        // 1 variant, images and categories ride along
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, id);
        assert_eq!(rows[0].brand.as_ref().map(|b| b.name.as_str()), Some("Nike"));
        let urls: Vec<&str> = rows[0].images.iter().map(|i| i.image_url.as_str()).collect();
        assert_eq!(urls, vec!["a.jpg", "b.jpg"]);
        let slugs: Vec<&str> = rows[0].categories.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["running", "sale"]);
    }

    #[tokio::test]
    async fn test_row_count_matches_matching_variants() {
        let (db, id) = seeded().await;
        let products = db.products();
        let vnds = db.grades().insert("VNDS").await.unwrap();
        products
            .insert_variant(id, &NewVariant::new("43", Some(vnds), 1_800_000, 2))
            .await
            .unwrap();
        products
            .insert_variant(id, &NewVariant::new("44", Some(vnds), 1_700_000, 0))
            .await
            .unwrap();
        products.insert_image(id, "c.jpg", 3).await.unwrap();
        let store = db.catalog_store();

        // 3 variants × 3 images × 2 categories would be 18 joined rows
        let rows = store
            .fetch_products(&ProductQuery::unfiltered(Scope::Brand(1)))
            .await
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].images.len(), 3);
        assert_eq!(rows[0].categories.len(), 2);
        assert!(rows[1..].iter().all(|r| r.images.is_empty() && r.categories.is_empty()));

        // in stock only: the sold-out pair drops out
        let rows = store
            .fetch_products(&ProductQuery::new(Scope::Brand(1), true, vec![]))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.variants.len() == 1));
    }

    #[tokio::test]
    async fn test_search_folds_non_ascii_names() {
        let (db, _) = seeded().await;
        let elan = db.products().insert(&NewProduct::new("ÉLAN RUNNER", Some(1))).await.unwrap();
        let store = db.catalog_store();

        for term in ["élan", "Élan", "ÉLAN run"] {
            let rows = store
                .fetch_products(&ProductQuery::unfiltered(Scope::NameContains(term.to_string())))
                .await
                .unwrap();
            let ids: Vec<ProductId> = rows.iter().map(|r| r.id).collect();
            assert_eq!(ids, vec![elan], "term {:?}", term);
        }
    }

    #[tokio::test]
    async fn test_category_scope_keeps_every_slug() {
        let (db, _) = seeded().await;
        let store = db.catalog_store();

        let rows = store
            .fetch_products(&ProductQuery::unfiltered(Scope::Category("sale".to_string())))
            .await
            .unwrap();

        let mut slugs: Vec<&str> = rows
            .iter()
            .flat_map(|r| r.categories.iter().map(|c| c.slug.as_str()))
            .collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs, vec!["running", "sale"]);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let (db, id) = seeded().await;
        let store = db.catalog_store();

        let rows = store
            .fetch_products(&ProductQuery::unfiltered(Scope::NameContains("VOMERO".to_string())))
            .await
            .unwrap();
        assert!(rows.iter().all(|r| r.id == id));
        assert!(!rows.is_empty());

        let rows = store
            .fetch_products(&ProductQuery::unfiltered(Scope::NameContains("vo%5".to_string())))
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_variantless_product_kept_only_when_unfiltered() {
        let (db, _) = seeded().await;
        let bare = db.products().insert(&NewProduct::new("Cortez", Some(1))).await.unwrap();
        let store = db.catalog_store();

        let rows = store
            .fetch_products(&ProductQuery::unfiltered(Scope::Brand(1)))
            .await
            .unwrap();
        let bare_row = rows.iter().find(|r| r.id == bare).unwrap();
        assert!(bare_row.variants.is_empty());
        assert!(bare_row.images.is_empty());
        assert!(bare_row.categories.is_empty());

        let rows = store
            .fetch_products(&ProductQuery::new(Scope::Brand(1), true, vec![]))
            .await
            .unwrap();
        assert!(rows.iter().all(|r| r.id != bare));
    }
}
