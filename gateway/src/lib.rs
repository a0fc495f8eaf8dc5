//! Ledger gateway for the split contract.
//!
//! Translates validated split requests into transactions against the
//! contract's three entry points (`create_split`, `deposit`, `distribute`)
//! and reads split objects back. Signing and execution belong to a
//! [`LedgerClient`]; this crate never retries or reinterprets its errors.

pub mod client;
pub mod config;
pub mod deployment;
pub mod error;
pub mod gateway;
pub mod http;
pub mod transaction;

pub use client::{ExecuteRequest, LedgerClient, ObjectDataOptions, ObjectResponse, TransactionReceipt};
pub use config::{ClientConfig, ConfigError};
pub use deployment::{Deployment, DEFAULT_PACKAGE_ID, MODULE_NAME};
pub use error::LedgerError;
pub use gateway::LedgerGateway;
pub use http::HttpLedgerClient;
pub use transaction::{Argument, CallArg, Command, MoveCall, MoveTarget, TransactionBlock};
