//! Canonical split request and the numeric rules behind it.

use collabsplit_types::{Address, BasisPoints, Member, MAX_MEMBERS, PERCENT_TOTAL};
use serde::{Deserialize, Serialize};

use crate::error::BuildError;

/// Sum of all member percentages.
pub fn percentage_total(members: &[Member]) -> f64 {
    members.iter().map(|m| m.percentage).sum()
}

/// True iff the percentages sum to exactly 100.
///
/// The comparison is exact: no tolerance is applied to fractional shares.
/// An empty list sums to 0 and never validates.
pub fn validate_percentages(members: &[Member]) -> bool {
    percentage_total(members) == PERCENT_TOTAL
}

/// Convert each percentage to basis points with `floor(p * 100)`.
pub fn to_basis_points(percentages: &[f64]) -> Vec<BasisPoints> {
    percentages
        .iter()
        .copied()
        .map(BasisPoints::from_percentage)
        .collect()
}

/// A validated split definition ready for `create_split`.
///
/// `addresses` and `basis_points` are index-aligned and hold between 1 and
/// [`MAX_MEMBERS`] entries.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSplitRequest")]
pub struct SplitRequest {
    addresses: Vec<Address>,
    basis_points: Vec<BasisPoints>,
}

/// Wire shape of a [`SplitRequest`] before its invariants are checked.
#[derive(Deserialize)]
struct RawSplitRequest {
    addresses: Vec<Address>,
    basis_points: Vec<BasisPoints>,
}

impl TryFrom<RawSplitRequest> for SplitRequest {
    type Error = BuildError;

    fn try_from(raw: RawSplitRequest) -> Result<Self, Self::Error> {
        if raw.addresses.len() != raw.basis_points.len() {
            return Err(BuildError::MisalignedRequest {
                addresses: raw.addresses.len(),
                basis_points: raw.basis_points.len(),
            });
        }
        if raw.addresses.is_empty() {
            return Err(BuildError::EmptyRequest);
        }
        if raw.addresses.len() > MAX_MEMBERS {
            return Err(BuildError::TooManyMembers { max: MAX_MEMBERS });
        }
        Ok(Self {
            addresses: raw.addresses,
            basis_points: raw.basis_points,
        })
    }
}

impl SplitRequest {
    /// Validate `members` and build the request.
    ///
    /// Checks, in order: the exact-100 total, the member cap, non-blank
    /// addresses, and each percentage lying in `[0, 100]`.
    pub fn from_members(members: &[Member]) -> Result<Self, BuildError> {
        if !validate_percentages(members) {
            return Err(BuildError::InvalidPercentageTotal {
                total: percentage_total(members),
            });
        }

        if members.len() > MAX_MEMBERS {
            return Err(BuildError::TooManyMembers { max: MAX_MEMBERS });
        }

        let mut addresses = Vec::with_capacity(members.len());
        for (index, member) in members.iter().enumerate() {
            let address = Address::new(member.address.as_str())
                .map_err(|_| BuildError::EmptyAddress { index })?;
            if !(0.0..=PERCENT_TOTAL).contains(&member.percentage) {
                return Err(BuildError::PercentageOutOfRange {
                    index,
                    percentage: member.percentage,
                });
            }
            addresses.push(address);
        }

        let percentages: Vec<f64> = members.iter().map(|m| m.percentage).collect();
        Ok(Self {
            addresses,
            basis_points: to_basis_points(&percentages),
        })
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn basis_points(&self) -> &[BasisPoints] {
        &self.basis_points
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}
