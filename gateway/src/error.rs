use thiserror::Error;

/// Failures from signing, execution or fetch calls.
///
/// The gateway hands these back unchanged; transient and permanent failures
/// are not distinguished.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("ledger returned HTTP {status}")]
    Http { status: u16 },

    #[error("ledger error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("invalid ledger response: {0}")]
    InvalidResponse(String),

    #[error("could not encode transaction argument: {0}")]
    Encoding(String),
}
