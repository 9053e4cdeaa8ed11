use bigdecimal::BigDecimal;
use bigdecimal::*;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
const SCALE: i64 = 100;

#[derive(Debug, Clone, Copy, Default)]
/// A struct representing a monetary value in centavos (hundredths of a real).
///
/// # Why Use Money? It is a Value Object.
/// Using `Money` as a wrapper around `i64` provides type safety and prevents
/// confusion with the page counters, which are plain integers. By storing
/// currency as an integer number of cents we avoid floating-point precision
/// issues in the billing arithmetic (franquia x valor da cópia).
///
/// # Examples
/// ```
/// use meter_billing::common::money::Money;
///
/// let amount = Money::new(5); // Represents R$ 0.05
/// assert_eq!(amount.as_i64(), 5);
/// assert_eq!(amount.to_string_2dp(), "0.05");
/// ```
pub struct Money(i64);

impl Money {
    pub fn new(cents: i64) -> Self {
        Self(cents)
    }

    pub fn zero() -> Self {
        Money(0)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    pub fn to_string_2dp(&self) -> String {
        let bd = BigDecimal::from(self.0) / BigDecimal::from(SCALE);
        format!("{:.2}", bd)
    }
}

impl std::str::FromStr for Money {
    type Err = ParseBigDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() {
            return Err(ParseBigDecimalError::Other("empty amount".into()));
        }

        let bd: BigDecimal = t.parse()?;

        // Scale to 2 decimal places
        let scaled = (bd * BigDecimal::from(SCALE)).round(0);
        let value: i64 = scaled
            .to_i64()
            .ok_or_else(|| ParseBigDecimalError::Other("amount overflow".into()))?;

        Ok(Money(value))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_2dp())
    }
}

// Serialized as a decimal string so the persisted blobs stay readable and
// round-trip without float loss.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_2dp())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl Eq for Money {}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.0.cmp(&other.0))
    }
}

// Arithmetic saturates instead of wrapping: counter input is never rejected
// upstream, so clamped amounts are the graceful-degradation contract here.
impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul<u64> for Money {
    type Output = Money;
    // Per-page price times a page count. Counts beyond i64 range clamp,
    // as does the product itself.
    fn mul(self, rhs: u64) -> Money {
        let count = i64::try_from(rhs).unwrap_or(i64::MAX);
        Money(self.0.saturating_mul(count))
    }
}
