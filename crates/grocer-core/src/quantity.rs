//! # Quantity Module
//!
//! Fixed-point quantities and the quantity-entry policy.
//!
//! Products are sold either by piece (`pcs`) or by weight (`kg`/`g`).
//! Piece counts are whole numbers; weights are fractional ("0.250 kg of
//! lentils"). Both are carried by one fixed-point type with three decimal
//! places so that line math stays in integers end to end:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Quantity(i64) in milli-units, 1.000 unit = 1000                        │
//! │                                                                         │
//! │  3 pcs       → Quantity(3000)                                           │
//! │  0.250 kg    → Quantity(250)                                            │
//! │  250 g       → Quantity(250_000)   (g products denominate in grams)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The entry policy mirrors the shop counter: weight quantities are typed or
//! picked from gram presets (100/250/500/1kg); garbage or non-positive input
//! clears the line instead of erroring.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::types::Unit;

/// Milli-units per whole unit.
const SCALE: i64 = 1000;

/// Gram shortcuts offered by the quantity editor for weight products.
pub const GRAM_PRESETS: [i64; 4] = [100, 250, 500, 1000];

// =============================================================================
// Quantity Type
// =============================================================================

/// A fixed-point quantity in milli-units (three decimal places).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(i64);

impl Quantity {
    /// Creates a quantity from whole units.
    #[inline]
    pub const fn from_whole(units: i64) -> Self {
        Quantity(units * SCALE)
    }

    /// Creates a quantity from milli-units.
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Quantity(millis)
    }

    /// Returns the raw milli-unit value.
    #[inline]
    pub const fn millis(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion, truncated.
    #[inline]
    pub const fn whole(&self) -> i64 {
        self.0 / SCALE
    }

    /// Zero quantity.
    #[inline]
    pub const fn zero() -> Self {
        Quantity(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks whether the quantity is an exact whole number of units.
    /// Piece-unit products require this.
    #[inline]
    pub const fn is_whole(&self) -> bool {
        self.0 % SCALE == 0
    }

    /// Returns the smaller of two quantities.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Quantity(self.0.min(other.0))
    }
}

impl Add for Quantity {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Quantity(self.0 + other.0)
    }
}

impl AddAssign for Quantity {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Quantity {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Quantity(self.0 - other.0)
    }
}

impl SubAssign for Quantity {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Quantity>>(iter: I) -> Self {
        iter.fold(Quantity::zero(), Add::add)
    }
}

/// Renders without trailing zeros: `3`, `0.25`, `1.005`.
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        let whole = abs / SCALE;
        let frac = abs % SCALE;
        if frac == 0 {
            write!(f, "{}{}", sign, whole)
        } else {
            let s = format!("{:03}", frac);
            write!(f, "{}{}.{}", sign, whole, s.trim_end_matches('0'))
        }
    }
}

// =============================================================================
// Quantity Entry Policy
// =============================================================================

/// Parses operator input into a quantity, applying the unit's rules.
///
/// ## Leniency
/// Non-numeric or non-positive input returns `None`; the caller treats that
/// as "clear the line", matching the counter workflow where backspacing the
/// field to nothing removes the item.
///
/// ## Piece products
/// Input must be a whole number, `None` otherwise, since "2.5 loaves" is
/// not a sale the register can ring.
///
/// Fractional digits beyond the third are truncated.
pub fn parse_quantity(input: &str, unit: Unit) -> Option<Quantity> {
    let millis = parse_decimal_millis(input)?;
    if millis <= 0 {
        return None;
    }
    let qty = Quantity::from_millis(millis);
    if unit == Unit::Pcs && !qty.is_whole() {
        return None;
    }
    Some(qty)
}

/// Normalizes a gram preset into a weight product's declared unit.
///
/// A `kg` product expresses 250 g as 0.250 kg; a `g` product keeps it as
/// 250 g. Piece products have no gram presets.
pub fn preset_quantity(grams: i64, unit: Unit) -> Option<Quantity> {
    if grams <= 0 {
        return None;
    }
    match unit {
        // 1 g == 1 milli-kg, so the gram count IS the milli value
        Unit::Kg => Some(Quantity::from_millis(grams)),
        Unit::G => Some(Quantity::from_whole(grams)),
        Unit::Pcs => None,
    }
}

/// Parses a decimal string into milli-units without going through floats.
fn parse_decimal_millis(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, f),
        None => (digits, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let whole: i64 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().ok()?
    };

    let frac_digits: String = frac_part.chars().take(3).collect();
    let mut frac: i64 = if frac_digits.is_empty() {
        0
    } else {
        frac_digits.parse().ok()?
    };
    for _ in frac_digits.len()..3 {
        frac *= 10;
    }

    let millis = whole.checked_mul(SCALE)?.checked_add(frac)?;
    Some(if negative { -millis } else { millis })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_and_millis() {
        assert_eq!(Quantity::from_whole(3).millis(), 3000);
        assert_eq!(Quantity::from_millis(250).whole(), 0);
        assert!(Quantity::from_whole(5).is_whole());
        assert!(!Quantity::from_millis(2500).is_whole());
    }

    #[test]
    fn test_display() {
        assert_eq!(Quantity::from_whole(3).to_string(), "3");
        assert_eq!(Quantity::from_millis(250).to_string(), "0.25");
        assert_eq!(Quantity::from_millis(1005).to_string(), "1.005");
        assert_eq!(Quantity::from_millis(2500).to_string(), "2.5");
    }

    #[test]
    fn test_parse_whole() {
        assert_eq!(parse_quantity("3", Unit::Pcs), Some(Quantity::from_whole(3)));
        assert_eq!(parse_quantity(" 2 ", Unit::Kg), Some(Quantity::from_whole(2)));
    }

    #[test]
    fn test_parse_fractional() {
        assert_eq!(
            parse_quantity("0.25", Unit::Kg),
            Some(Quantity::from_millis(250))
        );
        assert_eq!(
            parse_quantity(".5", Unit::Kg),
            Some(Quantity::from_millis(500))
        );
        // digits past the third decimal are truncated
        assert_eq!(
            parse_quantity("0.9999", Unit::Kg),
            Some(Quantity::from_millis(999))
        );
    }

    #[test]
    fn test_parse_rejects_fractional_pieces() {
        assert_eq!(parse_quantity("2.5", Unit::Pcs), None);
        assert_eq!(parse_quantity("2.0", Unit::Pcs), Some(Quantity::from_whole(2)));
    }

    #[test]
    fn test_parse_lenient_garbage() {
        assert_eq!(parse_quantity("", Unit::Kg), None);
        assert_eq!(parse_quantity("abc", Unit::Kg), None);
        assert_eq!(parse_quantity("1.2.3", Unit::Kg), None);
        assert_eq!(parse_quantity("0", Unit::Kg), None);
        assert_eq!(parse_quantity("-2", Unit::Kg), None);
        assert_eq!(parse_quantity(".", Unit::Kg), None);
    }

    #[test]
    fn test_presets_normalize_into_unit() {
        // 250 g preset on a kg product → 0.250 kg
        assert_eq!(
            preset_quantity(250, Unit::Kg),
            Some(Quantity::from_millis(250))
        );
        // 250 g preset on a g product → 250 g
        assert_eq!(
            preset_quantity(250, Unit::G),
            Some(Quantity::from_whole(250))
        );
        // 1 kg preset on a kg product → 1.000 kg
        assert_eq!(preset_quantity(1000, Unit::Kg), Some(Quantity::from_whole(1)));
        assert_eq!(preset_quantity(250, Unit::Pcs), None);
    }
}
