use async_trait::async_trait;

use crate::identity::errors::IdentityError;
use crate::identity::types::Identity;
use crate::passkey::Credential;

use super::store_type::IdentityStore;

#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    identities: Vec<Identity>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        tracing::info!("Creating new in-memory identity store");
        Self::default()
    }

    fn position(&self, email: &str) -> Option<usize> {
        self.identities.iter().position(|i| i.email == email)
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn add(&mut self, identity: Identity) -> Result<(), IdentityError> {
        tracing::debug!("Adding identity {} for {}", identity.id, identity.email);
        self.identities.push(identity);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError> {
        Ok(self.position(email).map(|idx| self.identities[idx].clone()))
    }

    async fn remove_incomplete(&mut self, email: &str) -> Result<bool, IdentityError> {
        match self.position(email) {
            Some(idx) if !self.identities[idx].is_enrolled() => {
                let removed = self.identities.remove(idx);
                tracing::info!(
                    "Removed incomplete registration {} for {}",
                    removed.id,
                    removed.email
                );
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn bind(
        &mut self,
        email: &str,
        credential: Credential,
    ) -> Result<Identity, IdentityError> {
        let idx = self
            .position(email)
            .ok_or_else(|| IdentityError::NotFound(email.to_string()))?;

        let identity = &mut self.identities[idx];
        if identity.credential.is_some() {
            return Err(IdentityError::AlreadyBound(email.to_string()));
        }

        identity.credential = Some(credential);
        Ok(identity.clone())
    }

    async fn list(&self) -> Result<Vec<Identity>, IdentityError> {
        Ok(self.identities.clone())
    }
}
