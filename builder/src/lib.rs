//! Split request builder.
//!
//! Turns a user-edited member list into a canonical [`SplitRequest`]:
//! - [`SplitForm`] holds the working list (add / remove / update) and the
//!   last user-facing error
//! - [`validate_percentages`] checks the exact-100 rule
//! - [`to_basis_points`] converts percentages by truncation

pub mod error;
pub mod form;
pub mod request;

pub use error::BuildError;
pub use form::SplitForm;
pub use request::{to_basis_points, validate_percentages, SplitRequest};
