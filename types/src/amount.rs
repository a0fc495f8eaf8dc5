//! Integer amount types: coin amounts in MIST and shares in basis points.
//!
//! Amounts are integers so no fractional arithmetic ever reaches the contract.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::params::{BASIS_POINTS_PER_PERCENT, BASIS_POINTS_TOTAL};

/// An amount of the native coin in its smallest unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mist(u64);

impl Mist {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Mist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} MIST", self.0)
    }
}

/// A share expressed in basis points, where 10000 = 100%.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BasisPoints(u64);

impl BasisPoints {
    pub const ZERO: Self = Self(0);
    pub const FULL: Self = Self(BASIS_POINTS_TOTAL);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Convert a percentage to basis points by truncation: `floor(percentage * 100)`.
    ///
    /// Truncation is the contract's policy, so `33.336` becomes `3333`, never `3334`.
    /// Negative and NaN inputs saturate to zero.
    pub fn from_percentage(percentage: f64) -> Self {
        Self((percentage * BASIS_POINTS_PER_PERCENT).floor() as u64)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bps", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_conversion_truncates() {
        assert_eq!(BasisPoints::from_percentage(33.336).raw(), 3333);
        assert_eq!(BasisPoints::from_percentage(66.664).raw(), 6666);
        assert_eq!(BasisPoints::from_percentage(0.009).raw(), 0);
    }

    #[test]
    fn whole_percentages_are_exact() {
        assert_eq!(BasisPoints::from_percentage(40.0).raw(), 4000);
        assert_eq!(BasisPoints::from_percentage(100.0), BasisPoints::FULL);
        assert_eq!(BasisPoints::from_percentage(0.0), BasisPoints::ZERO);
    }

    #[test]
    fn negative_and_nan_saturate_to_zero() {
        assert_eq!(BasisPoints::from_percentage(-5.0), BasisPoints::ZERO);
        assert_eq!(BasisPoints::from_percentage(f64::NAN), BasisPoints::ZERO);
    }

    #[test]
    fn basis_points_serialize_as_plain_integers() {
        let json = serde_json::to_string(&vec![BasisPoints::new(4000), BasisPoints::new(6000)])
            .unwrap();
        assert_eq!(json, "[4000,6000]");
    }

    #[test]
    fn mist_display() {
        assert_eq!(Mist::new(1_000).to_string(), "1000 MIST");
    }
}
