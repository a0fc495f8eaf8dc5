use thiserror::Error;

/// Validation failures. Reported synchronously; no remote call is issued.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("maximum {max} members allowed")]
    TooManyMembers { max: usize },

    #[error("percentages must sum to 100%, got {total}%")]
    InvalidPercentageTotal { total: f64 },

    #[error("member {index} has no address")]
    EmptyAddress { index: usize },

    #[error("member {index} has percentage {percentage} outside 0..=100")]
    PercentageOutOfRange { index: usize, percentage: f64 },

    #[error("split request has no members")]
    EmptyRequest,

    #[error("split request has {addresses} addresses but {basis_points} shares")]
    MisalignedRequest {
        addresses: usize,
        basis_points: usize,
    },
}
