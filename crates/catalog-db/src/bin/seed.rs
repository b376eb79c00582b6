//! # Demo Catalog Seeder
//!
//! Populates a catalog database with brands, grades, categories and sneakers
//! for local development.
//!
//! ## Usage
//! ```bash
//! # Seed the database named in catalog.toml (or ./catalog.db)
//! cargo run -p catalog-db --bin seed
//!
//! # Specify database path
//! cargo run -p catalog-db --bin seed -- --db ./data/catalog.db
//!
//! # Use a specific config file
//! cargo run -p catalog-db --bin seed -- --config ./catalog.toml
//! ```
//!
//! ## Generated Catalog
//! - Brands from the brand directory (ids as configured)
//! - Grades BNIB, VNDS, USED
//! - Categories sneakers, running, basketball, lifestyle
//! - Per model: 3 sizes × grade rotation, some variants out of stock,
//!   two images (display order 1 and 2)

use std::env;
use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog_core::brand::default_brand_entries;
use catalog_core::{CatalogFilters, GradeId};
use catalog_db::repository::product::{NewProduct, NewVariant};
use catalog_db::{CatalogConfig, Database};

/// Grade names the storefront ships with.
const GRADES: &[&str] = &["BNIB", "VNDS", "USED"];

/// (category slug, display name)
const CATEGORIES: &[(&str, &str)] = &[
    ("sneakers", "Sneakers"),
    ("running", "Running"),
    ("basketball", "Basketball"),
    ("lifestyle", "Lifestyle"),
];

/// (brand slug, model, base price in Rupiah, extra category)
const MODELS: &[(&str, &str, i64, &str)] = &[
    ("nike", "Air Jordan 1 High", 2_800_000, "basketball"),
    ("nike", "Pegasus 41", 1_900_000, "running"),
    ("nike", "Cortez", 850_000, "lifestyle"),
    ("adidas", "Samba OG", 1_400_000, "lifestyle"),
    ("adidas", "Ultraboost Light", 2_600_000, "running"),
    ("puma", "Suede Classic", 950_000, "lifestyle"),
    ("reebok", "Club C 85", 1_100_000, "lifestyle"),
    ("asics", "Gel-Kayano 14", 2_300_000, "running"),
    ("newbalance", "990v6", 3_600_000, "running"),
    ("newbalance", "550", 1_700_000, "basketball"),
    ("converse", "Chuck 70 Hi", 1_000_000, "lifestyle"),
];

const SIZES: &[&str] = &["40", "42", "44"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,catalog_db=debug,sqlx=warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Storefront Catalog Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>       Database file path (overrides config)");
                println!("  -c, --config <PATH>   catalog.toml path");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let mut config = CatalogConfig::load(config_path)?;
    if let Some(path) = db_path {
        config.database.path = path;
    }
    let brands = config.brand_directory()?;

    println!("Storefront Catalog Seeder");
    println!("=========================");
    println!("Database: {}", config.database.path.display());
    println!();

    let db = Database::new(config.db_config()).await?;
    println!("✓ Connected to database, migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let products = db.products();
    let start = std::time::Instant::now();

    // Brands: display names come from the built-in list when the config
    // entry has none.
    let fallback_names = default_brand_entries();
    for entry in &config.brands {
        let name = entry
            .name
            .clone()
            .or_else(|| {
                fallback_names
                    .iter()
                    .find(|e| e.slug == entry.slug)
                    .and_then(|e| e.name.clone())
            })
            .unwrap_or_else(|| entry.slug.clone());
        products.insert_brand(entry.id, &name).await?;
    }
    println!("✓ {} brands", config.brands.len());

    let mut grade_ids: Vec<GradeId> = Vec::with_capacity(GRADES.len());
    for grade in GRADES {
        grade_ids.push(db.grades().insert(grade).await?);
    }
    println!("✓ {} grades", grade_ids.len());

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for (slug, name) in CATEGORIES {
        category_ids.push((*slug, products.insert_category(name, slug).await?));
    }
    println!("✓ {} categories", category_ids.len());

    let mut generated = 0;
    let mut variants = 0;
    for (seed, (brand_slug, model, base_price, extra_category)) in MODELS.iter().enumerate() {
        let Some(brand_id) = brands.resolve(brand_slug) else {
            info!(brand = %brand_slug, model = %model, "Brand not configured, skipping model");
            continue;
        };

        let id = products
            .insert(&NewProduct::new(*model, Some(brand_id)).description(format!("{} by {}", model, brand_slug)))
            .await?;

        let image_slug = model.to_lowercase().replace(' ', "-");
        products
            .insert_image(id, &format!("/images/{}/{}-front.jpg", brand_slug, image_slug), 1)
            .await?;
        products
            .insert_image(id, &format!("/images/{}/{}-side.jpg", brand_slug, image_slug), 2)
            .await?;

        for (size_idx, size) in SIZES.iter().enumerate() {
            let n = seed + size_idx;
            let grade_id = grade_ids[n % grade_ids.len()];
            // USED and VNDS pairs sell below the BNIB price
            let price = base_price - (n % grade_ids.len()) as i64 * 150_000;
            // every fourth variant is sold out
            let stock = if n % 4 == 3 { 0 } else { (n % 5 + 1) as i64 };

            products
                .insert_variant(id, &NewVariant::new(*size, Some(grade_id), price, stock))
                .await?;
            variants += 1;
        }

        for (slug, category_id) in &category_ids {
            if *slug == "sneakers" || slug == extra_category {
                products.link_category(id, *category_id).await?;
            }
        }

        generated += 1;
    }

    println!();
    println!("✓ Generated {} products ({} variants) in {:?}", generated, variants, start.elapsed());

    // Smoke-check the listing paths
    println!();
    println!("Verifying listings...");
    let catalog = db.catalog(brands);

    let nike = catalog.fetch_by_brand("nike", &CatalogFilters::none()).await?;
    println!("  Brand 'nike': {} products", nike.len());

    let filters = CatalogFilters::none().with_grades(["BNIB"]).with_price("1000000-3000000");
    let nike_bnib = catalog.fetch_by_brand("nike", &filters).await?;
    println!("  Brand 'nike', BNIB, Rp 1-3 jt: {} products", nike_bnib.len());

    let running = catalog.fetch_by_category("running", &CatalogFilters::none()).await?;
    println!("  Category 'running': {} products", running.len());

    let search = catalog.search_unfiltered("air").await?;
    println!("  Search 'air': {} results", search.len());

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}
