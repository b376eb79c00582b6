//! # Price Buckets
//!
//! The storefront's price filter offers three fixed buckets. Each one maps to
//! a bounded range on `stock_variants.price`.
//!
//! ```text
//!                       1.000.000                 3.000.000
//!   ──────────────────────┼─────────────────────────┼──────────────────►
//!   lt-1000000       ────▶│ (exclusive)             │
//!   1000000-3000000       │◀──── inclusive ────────▶│
//!   gt-3000000            │              (exclusive)│◀────────────
//! ```
//!
//! A variant priced exactly 1,000,000 falls in `1000000-3000000` only.

use crate::query::{Condition, VariantField, VariantPredicate};
use crate::rupiah::Rupiah;

/// Lower/upper boundary shared by the buckets.
pub const LOW_BOUNDARY: i64 = 1_000_000;

/// Upper/lower boundary shared by the buckets.
pub const HIGH_BOUNDARY: i64 = 3_000_000;

/// A recognized price bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceBucket {
    /// `lt-1000000`: price < 1,000,000.
    Under1M,
    /// `1000000-3000000`: 1,000,000 ≤ price ≤ 3,000,000.
    From1MTo3M,
    /// `gt-3000000`: price > 3,000,000.
    Over3M,
}

impl PriceBucket {
    /// All buckets in display order.
    pub const ALL: [PriceBucket; 3] = [
        PriceBucket::Under1M,
        PriceBucket::From1MTo3M,
        PriceBucket::Over3M,
    ];

    /// Parses a bucket key as sent by the filter UI.
    ///
    /// Unrecognized keys yield `None`, which callers treat as "no price
    /// filter".
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim() {
            "lt-1000000" => Some(PriceBucket::Under1M),
            "1000000-3000000" => Some(PriceBucket::From1MTo3M),
            "gt-3000000" => Some(PriceBucket::Over3M),
            _ => None,
        }
    }

    /// The key this bucket is addressed by.
    pub fn key(&self) -> &'static str {
        match self {
            PriceBucket::Under1M => "lt-1000000",
            PriceBucket::From1MTo3M => "1000000-3000000",
            PriceBucket::Over3M => "gt-3000000",
        }
    }

    /// Range predicates on the variant price column.
    pub fn predicates(&self) -> Vec<VariantPredicate> {
        let price = |condition| VariantPredicate::new(VariantField::Price, condition);

        match self {
            PriceBucket::Under1M => vec![price(Condition::Lt(LOW_BOUNDARY))],
            PriceBucket::From1MTo3M => vec![
                price(Condition::Gte(LOW_BOUNDARY)),
                price(Condition::Lte(HIGH_BOUNDARY)),
            ],
            PriceBucket::Over3M => vec![price(Condition::Gt(HIGH_BOUNDARY))],
        }
    }

    /// Whether a price falls inside this bucket.
    pub fn contains(&self, price: Rupiah) -> bool {
        let amount = price.amount();
        match self {
            PriceBucket::Under1M => amount < LOW_BOUNDARY,
            PriceBucket::From1MTo3M => (LOW_BOUNDARY..=HIGH_BOUNDARY).contains(&amount),
            PriceBucket::Over3M => amount > HIGH_BOUNDARY,
        }
    }
}

/// Appends the predicates for `key` to `predicates`.
///
/// An absent or unrecognized key leaves the list unchanged.
pub fn apply_price_filter(predicates: &mut Vec<VariantPredicate>, key: Option<&str>) {
    if let Some(bucket) = key.and_then(PriceBucket::from_key) {
        predicates.extend(bucket.predicates());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VariantRow;

    fn variant(price: i64) -> VariantRow {
        VariantRow {
            price: Rupiah::new(price),
            stock: 1,
            grade_id: None,
        }
    }

    #[test]
    fn test_key_round_trip() {
        for bucket in PriceBucket::ALL {
            assert_eq!(PriceBucket::from_key(bucket.key()), Some(bucket));
        }
    }

    #[test]
    fn test_unknown_keys() {
        assert_eq!(PriceBucket::from_key(""), None);
        assert_eq!(PriceBucket::from_key("lt-500000"), None);
        assert_eq!(PriceBucket::from_key("GT-3000000"), None);
    }

    #[test]
    fn test_boundary_at_one_million() {
        let price = Rupiah::new(1_000_000);
        assert!(!PriceBucket::Under1M.contains(price));
        assert!(PriceBucket::From1MTo3M.contains(price));
        assert!(!PriceBucket::Over3M.contains(price));
    }

    #[test]
    fn test_boundary_at_three_million() {
        let price = Rupiah::new(3_000_000);
        assert!(!PriceBucket::Under1M.contains(price));
        assert!(PriceBucket::From1MTo3M.contains(price));
        assert!(!PriceBucket::Over3M.contains(price));

        assert!(PriceBucket::Over3M.contains(Rupiah::new(3_000_001)));
        assert!(PriceBucket::Under1M.contains(Rupiah::new(999_999)));
    }

    #[test]
    fn test_predicates_agree_with_contains() {
        let prices = [0, 999_999, 1_000_000, 1_500_000, 3_000_000, 3_000_001];

        for bucket in PriceBucket::ALL {
            let predicates = bucket.predicates();
            for price in prices {
                let v = variant(price);
                let all_match = predicates.iter().all(|p| p.matches(&v));
                assert_eq!(
                    all_match,
                    bucket.contains(Rupiah::new(price)),
                    "bucket {} price {}",
                    bucket.key(),
                    price
                );
            }
        }
    }

    #[test]
    fn test_apply_price_filter() {
        let mut predicates = Vec::new();
        apply_price_filter(&mut predicates, None);
        assert!(predicates.is_empty());

        apply_price_filter(&mut predicates, Some("cheap"));
        assert!(predicates.is_empty());

        apply_price_filter(&mut predicates, Some("1000000-3000000"));
        assert_eq!(predicates.len(), 2);
    }
}
