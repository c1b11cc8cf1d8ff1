//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Repeated partial payments drift:                                       │
//! │    500.00 - 166.67 - 166.67 - 166.66 ≠ 0.00 in binary floats            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units (poisha)                             │
//! │    ৳10.99 is stored as 1099                                             │
//! │    amount_paid + amount_due == total holds EXACTLY, forever             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use grocer_core::money::Money;
//!
//! // Create from minor units (preferred)
//! let price = Money::from_minor(25000); // ৳250.00
//!
//! // Arithmetic operations
//! let total = price + Money::from_minor(12000); // ৳370.00
//!
//! // NEVER do this:
//! // let bad = Money::from_float(250.00); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::quantity::Quantity;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (poisha for BDT).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for losses on below-cost sales
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support; persisted as a bare integer
///
/// ## Where Money Flows
/// ```text
/// Product.selling_price ──► CartLine.subtotal ──► Order.total
///                                                     │
/// Order.amount_paid ◄── payments ◄────────────────────┘
/// Order.amount_due = Order.total - Order.amount_paid (exact, always)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units (the smallest currency unit).
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from major and minor units (taka and poisha).
    ///
    /// For negative amounts, only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -5.50, not -4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (taka) portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns the smaller of two values.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    /// Multiplies a unit price by a fixed-point quantity.
    ///
    /// ## Implementation
    /// Quantities carry three decimal places (1.000 unit = 1000 millis), so
    /// the line total is `minor × millis / 1000`, rounded half away from
    /// zero. Intermediate math uses i128 to prevent overflow.
    ///
    /// ## Example
    /// ```rust
    /// use grocer_core::money::Money;
    /// use grocer_core::quantity::Quantity;
    ///
    /// let price = Money::from_minor(25000);            // ৳250.00 per kg
    /// let line = price.multiply_quantity(Quantity::from_millis(250)); // 0.250 kg
    /// assert_eq!(line.minor(), 6250);                  // ৳62.50
    /// ```
    pub fn multiply_quantity(&self, qty: Quantity) -> Money {
        let numerator = self.0 as i128 * qty.millis() as i128;
        let rounded = if numerator >= 0 {
            (numerator + 500) / 1000
        } else {
            (numerator - 500) / 1000
        };
        Money(rounded as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// This is for debugging and logs. Currency symbols and localization are a
/// presentation concern handled outside the core.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Summation for aggregate totals (cart subtotal, report revenue).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
