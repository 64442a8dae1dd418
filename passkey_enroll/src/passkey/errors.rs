use thiserror::Error;

use crate::utils::UtilError;

/// Errors raised while decoding or checking a passkey assertion.
///
/// None of these cross the crate boundary as-is: the flow collapses them into
/// a single verification failure.
#[derive(Debug, Error)]
pub enum PasskeyError {
    /// Error with the challenge embedded in the client data
    #[error("Invalid challenge: {0}")]
    Challenge(String),

    /// Error validating the client data JSON from the browser
    #[error("Invalid client data: {0}")]
    ClientData(String),

    /// Error during cryptographic verification of the assertion
    #[error("Verification error: {0}")]
    Verification(String),

    /// Algorithm or key type the verifier does not handle
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Error with improperly formatted data
    #[error("Invalid format: {0}")]
    Format(String),

    /// Error from utility operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}
