//! Fundamental types for CollabSplit.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! addresses, object ids, amounts, basis points, members and split records.

pub mod address;
pub mod amount;
pub mod error;
pub mod member;
pub mod params;
pub mod record;

pub use address::{Address, ObjectId};
pub use amount::{BasisPoints, Mist};
pub use error::TypesError;
pub use member::{Member, MemberUpdate};
pub use params::{BASIS_POINTS_TOTAL, MAX_MEMBERS, PERCENT_TOTAL};
pub use record::SplitRecord;
