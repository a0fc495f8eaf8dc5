use collabsplit_builder::BuildError;
use collabsplit_gateway::LedgerError;
use thiserror::Error;

use crate::inflight::RequestKey;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("{key} is already in flight")]
    AlreadyInFlight { key: RequestKey },

    #[error("{key} was cancelled")]
    Cancelled { key: RequestKey },

    #[error("invalid split object: {0}")]
    InvalidSplitObject(String),
}
