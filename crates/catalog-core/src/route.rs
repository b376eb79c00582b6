//! # Catalog Routes
//!
//! Resolves a catalog page URL `/{main}/{sub?}` to the scope it lists.
//!
//! ```text
//!   /nike                → Brand("nike")          main is a brand slug
//!   /running             → Category("running")
//!   /men/running         → Category("running")    sub wins over main
//!   /nike/running        → Brand("nike")          brand pages ignore sub
//! ```

use crate::brand::BrandDirectory;
use crate::validation::normalize_slug;

/// Which listing a catalog URL asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogRoute {
    /// Brand listing, by normalized slug.
    Brand(String),
    /// Category listing, by normalized slug.
    Category(String),
}

impl CatalogRoute {
    /// Resolves URL segments against the brand directory.
    pub fn resolve(brands: &BrandDirectory, main: &str, sub: Option<&str>) -> Self {
        let main = normalize_slug(main);

        if brands.contains(&main) {
            return CatalogRoute::Brand(main);
        }

        let slug = sub
            .map(normalize_slug)
            .filter(|s| !s.is_empty())
            .unwrap_or(main);
        CatalogRoute::Category(slug)
    }
}
