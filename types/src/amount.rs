//! Coin amounts as the ledger records them.
//!
//! The ledger stores amounts as JSON numbers (IEEE-754 doubles) and allows
//! fractions down to 1e-8. `Amount` wraps that double, rejects negative and
//! non-finite values, and renders the same decimal text the ledger does when
//! it hashes a transaction id.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::MycoinError;

/// A non-negative, finite coin amount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    pub const ZERO: Self = Self(0.0);

    /// A whole number of coins.
    pub const fn from_coins(coins: u32) -> Self {
        Self(coins as f64)
    }

    /// Wrap `value`, rejecting NaN, infinities and negatives.
    pub fn new(value: f64) -> Result<Self, MycoinError> {
        if !value.is_finite() || value < 0.0 {
            return Err(MycoinError::InvalidAmount(value.to_string()));
        }
        // Folds -0.0 into 0.0.
        Ok(Self(value + 0.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        Self::new(self.0 + other.0).ok()
    }

    /// `None` when `other` is larger than `self`.
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        if other.0 > self.0 {
            return None;
        }
        Self::new(self.0 - other.0).ok()
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        self.checked_sub(other).unwrap_or(Self::ZERO)
    }
}

impl TryFrom<f64> for Amount {
    type Error = MycoinError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl From<u32> for Amount {
    fn from(coins: u32) -> Self {
        Self::from_coins(coins)
    }
}

impl FromStr for Amount {
    type Err = MycoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| MycoinError::InvalidAmount(s.to_string()))?;
        Self::new(value)
    }
}

// NaN is unrepresentable, so equality is total.
impl Eq for Amount {}

impl PartialOrd for Amount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Amount {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Amount {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

/// Saturates to the largest finite value instead of overflowing to infinity.
impl Add for Amount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.checked_add(rhs).unwrap_or(Self(f64::MAX))
    }
}

impl Sub for Amount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.saturating_sub(rhs)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Shortest round-trip decimal, switching to exponent form outside
/// `[1e-6, 1e21)` the way JavaScript number-to-string does.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v == 0.0 || (1e-6..1e21).contains(&v) {
            return write!(f, "{v}");
        }
        let exp = format!("{v:e}");
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                write!(f, "{mantissa}e+{power}")
            }
            _ => f.write_str(&exp),
        }
    }
}
