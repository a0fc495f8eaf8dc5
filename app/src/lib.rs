//! Application layer for CollabSplit.
//!
//! - [`SplitStore`]: the single owner of splits, selection, loading flag and error
//! - [`RequestTracker`]: in-flight request tokens with cancellation, so the
//!   same submission cannot be issued twice concurrently
//! - [`SplitController`]: wires form → builder → gateway → store

pub mod controller;
pub mod error;
pub mod inflight;
pub mod record;
pub mod store;

pub use controller::SplitController;
pub use error::AppError;
pub use inflight::{CancelHandle, InFlightRequest, RequestId, RequestKey, RequestTracker};
pub use record::parse_split_record;
pub use store::{SplitStore, StoreAction};
