//! Money type for representing currency amounts
//!
//! Internally stores amounts in minor units (i64 cents) so that totals are
//! exact: `income - expense == balance` holds without rounding drift. Store
//! documents carry major-unit numbers and are converted at the boundary.

use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Currency symbols accepted in front of typed amounts
const CURRENCY_SYMBOLS: &[char] = &['₦', '$', '€', '£'];

/// Largest magnitude a single amount may have, in cents (10 trillion units)
///
/// Keeps every amount exactly representable as an `f64` major-unit number
/// and far enough from `i64::MAX` that totals of realistic collections fit.
pub const MAX_AMOUNT_CENTS: i64 = 1_000_000_000_000_000;

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use cashly::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.units(), 10);
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Convert a major-unit number (as stored in documents) to Money
    ///
    /// Rounds to the nearest cent. Returns `None` for NaN, infinite input,
    /// or a magnitude above [`MAX_AMOUNT_CENTS`].
    pub fn from_major(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents.abs() > MAX_AMOUNT_CENTS as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    /// The amount as a major-unit number, for writing documents
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Whether the magnitude is within [`MAX_AMOUNT_CENTS`]
    pub const fn is_within_limit(&self) -> bool {
        self.0.unsigned_abs() <= MAX_AMOUNT_CENTS as u64
    }

    /// Addition that reports overflow instead of wrapping
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Parse a money amount from user input
    ///
    /// Accepts formats: "10.50", "-10.50", "₦10.50", "1,200", "10"
    /// (plain integers are whole units). Thousands separators are dropped;
    /// one leading sign is allowed and everything else must be ASCII digits.
    /// Digits past the second decimal place are truncated.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(original.to_string());

        let (negative, rest) = if let Some(stripped) = original.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, original.strip_prefix('+').unwrap_or(original))
        };

        let rest = rest.trim_start_matches(CURRENCY_SYMBOLS);
        let cleaned: String = rest.chars().filter(|c| *c != ',').collect();

        let (whole, fraction) = cleaned.split_once('.').unwrap_or((cleaned.as_str(), ""));
        let is_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
            return Err(invalid());
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        // Only ASCII digits remain, so byte offsets are char offsets
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction[..2].parse().map_err(|_| invalid())?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .filter(|c| *c <= MAX_AMOUNT_CENTS)
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol and thousands grouping
    ///
    /// Cents are only shown when non-zero: `₦5,300`, `-₦12.50`.
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let units = self.units().unsigned_abs().to_formatted_string(&Locale::en);
        if self.cents_part() == 0 {
            format!("{}{}{}", sign, symbol, units)
        } else {
            format!("{}{}{}.{:02}", sign, symbol, units, self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.units().unsigned_abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_from_major() {
        assert_eq!(Money::from_major(5000.0), Some(Money::from_units(5000)));
        assert_eq!(Money::from_major(-12.5), Some(Money::from_cents(-1250)));
        assert_eq!(Money::from_major(0.1 + 0.2), Some(Money::from_cents(30)));
        assert_eq!(Money::from_major(f64::NAN), None);
        assert_eq!(Money::from_major(f64::INFINITY), None);
    }

    #[test]
    fn test_from_major_rejects_out_of_range() {
        assert_eq!(
            Money::from_major(10_000_000_000_000.0),
            Some(Money::from_cents(MAX_AMOUNT_CENTS))
        );
        assert_eq!(Money::from_major(10_000_000_000_000.01), None);
        assert_eq!(Money::from_major(5e16), None);
        assert_eq!(Money::from_major(-92233720368547758.08), None);
        assert_eq!(Money::from_major(i64::MIN as f64), None);
    }

    #[test]
    fn test_checked_add() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max.checked_add(Money::from_cents(1)), None);
        assert_eq!(
            Money::from_cents(1).checked_add(Money::from_cents(2)),
            Some(Money::from_cents(3))
        );
        assert!(Money::from_cents(-MAX_AMOUNT_CENTS).is_within_limit());
        assert!(!Money::from_cents(MAX_AMOUNT_CENTS + 1).is_within_limit());
    }

    #[test]
    fn test_to_major() {
        assert_eq!(Money::from_cents(-1250).to_major(), -12.5);
        assert_eq!(Money::from_units(300).to_major(), 300.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-10.50");
        assert_eq!(format!("{}", Money::from_cents(-5)), "-0.05");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_units(5300).format_with_symbol("₦"), "₦5,300");
        assert_eq!(Money::from_cents(-1250).format_with_symbol("₦"), "-₦12.50");
        assert_eq!(
            Money::from_units(1_234_567).format_with_symbol("$"),
            "$1,234,567"
        );
        assert_eq!(Money::zero().format_with_symbol("$"), "$0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("₦10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("1,200").unwrap().cents(), 120000);
        assert_eq!(Money::parse(" 1,234.56 ").unwrap().cents(), 123456);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("$").is_err());
        assert!(Money::parse(".").is_err());
        assert!(Money::parse("--5").is_err());
        assert!(Money::parse("+-5").is_err());
        assert!(Money::parse("1.-5").is_err());
        assert!(Money::parse("1.+5").is_err());
        assert!(Money::parse("$-5").is_err());
    }

    #[test]
    fn test_parse_non_ascii_is_error() {
        assert!(Money::parse("1.₦").is_err());
        assert!(Money::parse("1.5₦").is_err());
        assert!(Money::parse("١٢").is_err());
        assert!(Money::parse("₦₦").is_err());
    }

    #[test]
    fn test_parse_truncates_extra_decimals() {
        assert_eq!(Money::parse("1.239").unwrap().cents(), 123);
        assert_eq!(Money::parse("-₦1,000.5").unwrap().cents(), -100050);
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert_eq!(
            Money::parse("10,000,000,000,000").unwrap().cents(),
            MAX_AMOUNT_CENTS
        );
        assert!(Money::parse("10,000,000,000,000.01").is_err());
        assert!(Money::parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");
    }
}
