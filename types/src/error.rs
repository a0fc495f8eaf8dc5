//! Top-level error type shared across crates.

use thiserror::Error;

/// Errors raised while constructing CollabSplit identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("address must not be empty")]
    EmptyAddress,

    #[error("object id must not be empty")]
    EmptyObjectId,
}
