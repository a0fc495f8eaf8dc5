//! Fixed limits of the split contract.

/// Hard cap on the number of members in one split.
pub const MAX_MEMBERS: usize = 10;

/// Percentages of a valid split must sum to exactly this value.
pub const PERCENT_TOTAL: f64 = 100.0;

/// 100% expressed in basis points.
pub const BASIS_POINTS_TOTAL: u64 = 10_000;

/// Basis points per whole percent.
pub const BASIS_POINTS_PER_PERCENT: f64 = 100.0;
