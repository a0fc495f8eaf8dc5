//! Split members as edited by a user before submission.

use serde::{Deserialize, Serialize};

/// One row of a split definition.
///
/// `address` stays a plain string because a freshly added member is blank and
/// the user fills it in later. It becomes an [`Address`](crate::Address) only
/// when the split is submitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub address: String,
    /// Share in percent, expected in `[0, 100]`.
    pub percentage: f64,
}

impl Member {
    pub fn new(address: impl Into<String>, percentage: f64) -> Self {
        Self {
            address: address.into(),
            percentage,
        }
    }

    /// A member with an empty address and a zero share.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Replace exactly one field.
    pub fn apply(&mut self, update: MemberUpdate) {
        match update {
            MemberUpdate::Address(address) => self.address = address,
            MemberUpdate::Percentage(percentage) => self.percentage = percentage,
        }
    }
}

/// A single-field edit of a [`Member`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "field", content = "value")]
pub enum MemberUpdate {
    Address(String),
    Percentage(f64),
}
