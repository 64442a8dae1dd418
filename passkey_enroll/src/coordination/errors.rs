//! Error types for the coordination layer

use thiserror::Error;

use crate::identity::IdentityError;
use crate::passkey::PasskeyError;
use crate::utils::UtilError;

/// Errors returned by `PasskeyFlow` operations
#[derive(Error, Debug)]
pub enum CoordinationError {
    /// No identity (or no enrolled identity) matches the email
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credential rebind attempt
    #[error("Already bound: {0}")]
    AlreadyBound(String),

    /// A required request field is absent or empty
    #[error("Missing field: {0}")]
    MissingField(String),

    /// The assertion did not authenticate the identity
    #[error("Verification failed: {0}")]
    VerificationFailed(String),

    /// Failure of the random source or similar local fault
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoordinationError {
    /// Log the error and return self
    ///
    /// This method logs the error with appropriate context and returns self,
    /// allowing for method chaining and explicit logging when needed.
    pub fn log(self) -> Self {
        match &self {
            Self::NotFound(msg) => tracing::warn!("Not found: {}", msg),
            Self::AlreadyBound(msg) => tracing::warn!("Already bound: {}", msg),
            Self::MissingField(msg) => tracing::warn!("Missing field: {}", msg),
            Self::VerificationFailed(msg) => tracing::warn!("Verification failed: {}", msg),
            Self::Internal(msg) => tracing::error!("Internal error: {}", msg),
        }
        self
    }
}

impl From<IdentityError> for CoordinationError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::NotFound(email) => Self::NotFound(email),
            IdentityError::AlreadyBound(email) => Self::AlreadyBound(email),
        }
        .log()
    }
}

// Every passkey error on the login path collapses into one failure signal
impl From<PasskeyError> for CoordinationError {
    fn from(err: PasskeyError) -> Self {
        Self::VerificationFailed(err.to_string()).log()
    }
}

impl From<UtilError> for CoordinationError {
    fn from(err: UtilError) -> Self {
        Self::Internal(err.to_string()).log()
    }
}
