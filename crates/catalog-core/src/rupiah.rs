//! # Rupiah Module
//!
//! Provides the `Rupiah` type for variant prices.
//!
//! ## Why Integer Prices?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rupiah has no minor unit in everyday use: Rp 1.500.000 is stored as    │
//! │  the integer 1500000. Bucket boundaries (1,000,000 / 3,000,000) are     │
//! │  exact integer comparisons, so a variant priced exactly 1,000,000 can   │
//! │  never drift across a boundary because of float rounding.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catalog_core::rupiah::Rupiah;
//!
//! let price = Rupiah::new(1_500_000);
//! assert_eq!(price.amount(), 1_500_000);
//! assert_eq!(price.to_string(), "Rp 1.500.000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Rupiah Type
// =============================================================================

/// A price in whole Indonesian Rupiah.
///
/// Serializes as a bare integer so the frontend receives the same number the
/// data store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rupiah(i64);

impl Rupiah {
    /// Creates a price from a whole Rupiah amount.
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Rupiah(amount)
    }

    /// Returns the whole Rupiah amount.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Zero price.
    #[inline]
    pub const fn zero() -> Self {
        Rupiah(0)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Formats with the `id-ID` convention: `Rp` prefix, `.` as thousands
/// separator, no decimals.
impl fmt::Display for Rupiah {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

        for (idx, ch) in digits.chars().enumerate() {
            if idx > 0 && (digits.len() - idx) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rp {}", sign, grouped)
    }
}

impl Default for Rupiah {
    fn default() -> Self {
        Rupiah::zero()
    }
}

impl From<i64> for Rupiah {
    fn from(amount: i64) -> Self {
        Rupiah(amount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
