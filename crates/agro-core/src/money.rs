//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A season of fuel invoices summed as floats drifts by kopiykas,         │
//! │  and the expense report stops matching the receipts.                    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Kopiykas                                         │
//! │    Every stored amount is an i64 count of the smallest currency unit.   │
//! │    The single rounding point is the line total (unit price × quantity), │
//! │    and it is explicit.                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use agro_core::money::Money;
//!
//! // Create from kopiykas (preferred)
//! let price = Money::from_cents(5650); // 56.50 per litre
//!
//! // The one place quantities meet money:
//! let total = price.line_total(120.0); // 120 litres of fuel
//! assert_eq!(total.cents(), 678_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (kopiykas).
///
/// ## Design Decisions
/// - **i64 (signed)**: allows negative values for corrections
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from kopiykas (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use agro_core::money::Money;
    ///
    /// let price = Money::from_cents(5650); // 56.50
    /// assert_eq!(price.cents(), 5650);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in kopiykas.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (hryvnias) portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Computes a line total: unit price × quantity.
    ///
    /// This is the ONE place in the system where a monetary value is
    /// multiplied by a fractional quantity (2.5 t of seed, 120 l of fuel).
    /// The result is rounded half away from zero back to whole kopiykas.
    ///
    /// ## Example
    /// ```rust
    /// use agro_core::money::Money;
    ///
    /// let seed_price = Money::from_cents(1_250_000); // 12,500.00 per tonne
    /// assert_eq!(seed_price.line_total(2.5).cents(), 3_125_000);
    ///
    /// // Rounding is explicit: 0.03 × 0.5 = 0.015 → 0.02
    /// assert_eq!(Money::from_cents(3).line_total(0.5).cents(), 2);
    /// ```
    #[inline]
    pub fn line_total(&self, quantity: f64) -> Money {
        Money((self.0 as f64 * quantity).round() as i64)
    }
}

// =============================================================================
// Arithmetic Operators
// =============================================================================

impl Add for Money {
    type Output = Money;

    #[inline]
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    #[inline]
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Display
// =============================================================================

/// Formats as a decimal amount, e.g., `1234.50` or `-0.05`.
///
/// Currency symbols are a UI concern; reports append "UAH" themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            write!(f, "-{}.{:02}", (-self.0) / 100, (-self.0) % 100)
        } else {
            write!(f, "{}.{:02}", self.major(), self.minor())
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents_roundtrip() {
        let m = Money::from_cents(1099);
        assert_eq!(m.cents(), 1099);
        assert_eq!(m.major(), 10);
        assert_eq!(m.minor(), 99);
    }

    #[test]
    fn test_line_total_whole_quantity() {
        let price = Money::from_cents(5650);
        assert_eq!(price.line_total(2.0).cents(), 11300);
    }

    #[test]
    fn test_line_total_fractional_quantity() {
        // 12,500.00 per tonne × 2.5 t
        let price = Money::from_cents(1_250_000);
        assert_eq!(price.line_total(2.5).cents(), 3_125_000);
    }

    #[test]
    fn test_line_total_rounds_half_away_from_zero() {
        assert_eq!(Money::from_cents(3).line_total(0.5).cents(), 2);
        assert_eq!(Money::from_cents(5).line_total(0.5).cents(), 3);
    }

    #[test]
    fn test_line_total_zero_quantity() {
        assert_eq!(Money::from_cents(9999).line_total(0.0).cents(), 0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(250);
        assert_eq!((a + b).cents(), 1250);
        assert_eq!((a - b).cents(), 750);

        let mut c = Money::zero();
        c += a;
        c -= b;
        assert_eq!(c.cents(), 750);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 350].iter().map(|c| Money::from_cents(*c)).sum();
        assert_eq!(total.cents(), 650);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(123450).to_string(), "1234.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::from_cents(-123450).to_string(), "-1234.50");
    }
}
