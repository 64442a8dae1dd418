use thiserror::Error;

#[derive(Clone, Error, Debug, PartialEq)]
pub enum IdentityError {
    /// No identity is registered under the email
    #[error("Identity not found: {0}")]
    NotFound(String),

    /// The matched identity already carries a credential
    #[error("Credential already bound: {0}")]
    AlreadyBound(String),
}
