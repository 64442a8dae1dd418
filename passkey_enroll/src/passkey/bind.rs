use chrono::Utc;

use crate::identity::{Identity, IdentityError, IdentityStore};

use super::types::Credential;

/// Bind `credential` to the identity registered under `email`.
///
/// Fails with `NotFound` for an unknown email and with `AlreadyBound` when
/// the identity already holds a credential, identical or not.
pub(crate) async fn bind_credential(
    store: &mut dyn IdentityStore,
    email: &str,
    mut credential: Credential,
) -> Result<Identity, IdentityError> {
    credential.bound_at = Some(Utc::now());

    let identity = store.bind(email, credential).await?;
    tracing::info!("Bound credential to identity {} ({})", identity.id, email);

    Ok(identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::InMemoryIdentityStore;
    use crate::passkey::CredentialAlgorithm;

    #[tokio::test]
    async fn test_bind_credential_stamps_bound_at() {
        let mut store = InMemoryIdentityStore::new();
        store
            .add(Identity::new("123456789".to_string(), "a@b.com".to_string()))
            .await
            .unwrap();

        let credential = Credential::new("key".to_string(), CredentialAlgorithm::Es256);
        let identity = bind_credential(&mut store, "a@b.com", credential)
            .await
            .unwrap();

        assert!(identity.credential.unwrap().bound_at.is_some());
    }

    #[tokio::test]
    async fn test_bind_credential_identical_rebind_fails() {
        let mut store = InMemoryIdentityStore::new();
        store
            .add(Identity::new("123456789".to_string(), "a@b.com".to_string()))
            .await
            .unwrap();

        let credential = Credential::new("key".to_string(), CredentialAlgorithm::Es256);
        bind_credential(&mut store, "a@b.com", credential.clone())
            .await
            .unwrap();

        let result = bind_credential(&mut store, "a@b.com", credential).await;
        assert!(matches!(result, Err(IdentityError::AlreadyBound(_))));
    }

    #[tokio::test]
    async fn test_bind_credential_unknown_email() {
        let mut store = InMemoryIdentityStore::new();
        let credential = Credential::new("key".to_string(), CredentialAlgorithm::Es256);

        let result = bind_credential(&mut store, "a@b.com", credential).await;
        assert!(matches!(result, Err(IdentityError::NotFound(_))));
    }
}
