//! # Result Mapper
//!
//! Folds joined product rows into one [`ProductCard`] per product.
//!
//! ## The Fold
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  rows (join order not guaranteed)                                       │
//! │                                                                         │
//! │   #7  Dunk Low   variant 800.000 ×3   image o2   cat "sneakers"        │
//! │   #7  Dunk Low   variant 500.000 ×0   image o1   cat "lifestyle"       │
//! │   #3  Samba OG   variant 1.100.000 ×1 (no image) cat "sneakers"        │
//! │   #7  Dunk Low   variant 650.000 ×1   image o1   cat "sneakers"        │
//! │                                                                         │
//! │  group by id, keep first-seen order                                     │
//! │                                                                         │
//! │   #7  price  = min(in-stock) = 650.000   (500.000 has no stock)        │
//! │       image  = order 1                                                  │
//! │       cats   = ["sneakers", "lifestyle"]                               │
//! │   #3  price  = 1.100.000, image = null, cats = ["sneakers"]            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use crate::rupiah::Rupiah;
use crate::types::{ProductCard, ProductId, ProductRow};

/// Order value of the primary image.
pub const PRIMARY_IMAGE_ORDER: i64 = 1;

/// Accumulator for one product while folding.
#[derive(Debug)]
struct CardBuilder {
    id: ProductId,
    name: String,
    brand_name: Option<String>,
    primary_image: Option<String>,
    first_image: Option<String>,
    min_price: Option<Rupiah>,
    categories: Vec<String>,
}

impl CardBuilder {
    fn new(row: &ProductRow) -> Self {
        CardBuilder {
            id: row.id,
            name: row.name.clone(),
            brand_name: None,
            primary_image: None,
            first_image: None,
            min_price: None,
            categories: Vec::new(),
        }
    }

    fn absorb(&mut self, row: ProductRow) {
        if self.brand_name.is_none() {
            self.brand_name = row.brand.map(|b| b.name);
        }

        for image in row.images {
            if self.primary_image.is_none() && image.order == PRIMARY_IMAGE_ORDER {
                self.primary_image = Some(image.image_url.clone());
            }
            if self.first_image.is_none() {
                self.first_image = Some(image.image_url);
            }
        }

        for variant in row.variants.iter().filter(|v| v.in_stock()) {
            self.min_price = Some(match self.min_price {
                Some(current) => current.min(variant.price),
                None => variant.price,
            });
        }

        for category in row.categories {
            if !self.categories.contains(&category.slug) {
                self.categories.push(category.slug);
            }
        }
    }

    fn build(self) -> ProductCard {
        ProductCard {
            id: self.id,
            name: self.name,
            brand_name: self.brand_name,
            image_url: self.primary_image.or(self.first_image),
            price: self.min_price,
            categories: self.categories,
        }
    }
}

/// Maps raw rows to uniform product records.
///
/// - One record per distinct product id, in first-encounter order.
/// - `price` is the minimum over in-stock variants across *all* rows of the
///   product, never the first row's price.
/// - `image_url` is the order-1 image, else the first image seen.
/// - `categories` holds each slug once.
pub fn map_products<I>(rows: I) -> Vec<ProductCard>
where
    I: IntoIterator<Item = ProductRow>,
{
    let mut order: Vec<ProductId> = Vec::new();
    let mut groups: HashMap<ProductId, CardBuilder> = HashMap::new();

    for row in rows {
        let builder = groups.entry(row.id).or_insert_with(|| {
            order.push(row.id);
            CardBuilder::new(&row)
        });
        builder.absorb(row);
    }

    order
        .into_iter()
        .filter_map(|id| groups.remove(&id))
        .map(CardBuilder::build)
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
