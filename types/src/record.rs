//! The on-chain split as read back from the ledger.

use serde::{Deserialize, Serialize};

use crate::address::{Address, ObjectId};
use crate::amount::{BasisPoints, Mist};

/// A split object fetched from the ledger.
///
/// Immutable from the client's point of view; only `create_split`, `deposit`
/// and `distribute` change it, and only on-chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRecord {
    pub id: ObjectId,
    pub members: Vec<Address>,
    /// Shares in basis points, index-aligned with `members`.
    pub percentages: Vec<BasisPoints>,
    /// Undistributed balance held by the split.
    pub balance: Mist,
}

impl SplitRecord {
    /// Sum of all recorded shares, or `None` if the ledger's values overflow.
    pub fn total_basis_points(&self) -> Option<u64> {
        self.percentages
            .iter()
            .try_fold(0u64, |total, bps| total.checked_add(bps.raw()))
    }
}
