//! Nullable infrastructure for deterministic testing.
//!
//! The ledger is abstracted behind [`LedgerClient`](collabsplit_gateway::LedgerClient).
//! This crate provides a test-friendly implementation that:
//! - Records every request it receives
//! - Returns deterministic receipts and canned objects
//! - Never touches the network
//!
//! Usage: swap the HTTP client for [`NullLedgerClient`] in tests.

pub mod ledger;

pub use ledger::{NullLedgerClient, SubmissionGate};
