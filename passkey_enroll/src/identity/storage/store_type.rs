use async_trait::async_trait;

use crate::identity::errors::IdentityError;
use crate::identity::types::Identity;
use crate::passkey::Credential;

/// Storage seam for identities.
///
/// Implementations keep insertion order: every email lookup resolves to the
/// earliest identity registered under that email. Callers serialize access
/// (see `PasskeyFlow`), so the check-then-act methods below run as one
/// critical section.
#[async_trait]
pub trait IdentityStore: Send + Sync + 'static {
    /// Append an identity. Duplicate emails are accepted.
    async fn add(&mut self, identity: Identity) -> Result<(), IdentityError>;

    /// First identity registered under `email`, if any.
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError>;

    /// Remove the first identity under `email` if it has no credential.
    ///
    /// Returns true when a record was removed.
    async fn remove_incomplete(&mut self, email: &str) -> Result<bool, IdentityError>;

    /// Attach `credential` to the first identity under `email`.
    async fn bind(&mut self, email: &str, credential: Credential)
    -> Result<Identity, IdentityError>;

    /// Every identity, enrolled or not, in insertion order.
    async fn list(&self) -> Result<Vec<Identity>, IdentityError>;
}
