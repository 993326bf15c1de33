//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during mock login.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Student id or password left blank.
    #[error("Please fill in all fields")]
    MissingFields,
}
