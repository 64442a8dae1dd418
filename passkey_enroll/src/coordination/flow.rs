use std::sync::Arc;
use tokio::sync::Mutex;

use crate::challenge::{ChallengeCache, generate_digits};
use crate::config::{ENROLL_CHALLENGE_LENGTH, ENROLL_ID_LENGTH, PASSKEY_CHALLENGE_TIMEOUT};
use crate::identity::{Identity, IdentityStore, InMemoryIdentityStore};
use crate::passkey::{
    ParsedClientData, PublicKey, RegistrationOptions, bind_credential, verify_assertion,
};

use super::errors::CoordinationError;
use super::types::{
    CredentialChallenge, LoginRequest, RegisterResponse, RegisteredUser, SetCredentialRequest,
};

/// Enrollment and login state machine over a shared identity store.
///
/// Cloning is cheap and every clone sees the same store. Store mutations
/// happen under a single lock; signature checks run after it is released.
#[derive(Clone)]
pub struct PasskeyFlow {
    store: Arc<Mutex<Box<dyn IdentityStore>>>,
    challenges: Arc<Mutex<ChallengeCache>>,
}

impl Default for PasskeyFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl PasskeyFlow {
    /// Flow backed by a fresh in-memory store
    pub fn new() -> Self {
        Self::with_store(Box::new(InMemoryIdentityStore::new()))
    }

    pub fn with_store(store: Box<dyn IdentityStore>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            challenges: Arc::new(Mutex::new(ChallengeCache::new())),
        }
    }

    /// Register `email` with a fresh identifier.
    ///
    /// Registering an email twice creates a second identity; lookups keep
    /// resolving to the first one. The returned challenge and creation
    /// options are for the client's credential ceremony and are not retained.
    pub async fn register(&self, email: &str) -> Result<RegisterResponse, CoordinationError> {
        if email.is_empty() {
            return Err(CoordinationError::MissingField("email".to_string()).log());
        }

        let id = generate_digits(*ENROLL_ID_LENGTH, 0, 9)?;
        let challenge = generate_digits(*ENROLL_CHALLENGE_LENGTH, 0, 9)?;

        let identity = Identity::new(id, email.to_string());
        let options = RegistrationOptions::new(&identity, &challenge);

        self.store.lock().await.add(identity.clone()).await?;
        tracing::info!("Registered identity {} for {}", identity.id, email);

        Ok(RegisterResponse {
            user: RegisteredUser {
                id: identity.id,
                email: identity.email,
            },
            challenge,
            options,
        })
    }

    /// Bind the credential from `request` to the identity of its email.
    pub async fn set_credential(
        &self,
        request: SetCredentialRequest,
    ) -> Result<String, CoordinationError> {
        let email = required(request.email, "email")?;
        let credential = request
            .credentials
            .ok_or_else(|| CoordinationError::MissingField("credentials".to_string()).log())?;

        // Binding stays permissive; an unusable key only fails at login
        if let Err(e) = PublicKey::from_credential(&credential) {
            tracing::warn!("Binding a credential whose public key does not decode: {}", e);
        }

        let mut store = self.store.lock().await;
        bind_credential(&mut **store, &email, credential).await?;

        Ok("Registration complete. Now try logging in".to_string())
    }

    /// Look up an enrolled identity and issue a login challenge for it.
    ///
    /// An identity that never got a credential is removed by this call, so a
    /// stalled registration can be started over.
    pub async fn get_credential(
        &self,
        email: &str,
    ) -> Result<CredentialChallenge, CoordinationError> {
        let challenge = generate_digits(*ENROLL_CHALLENGE_LENGTH, 0, 9)?;

        let identity = {
            let mut store = self.store.lock().await;
            if store.remove_incomplete(email).await? {
                return Err(CoordinationError::NotFound(format!(
                    "{email} never completed registration"
                ))
                .log());
            }
            store
                .find_by_email(email)
                .await?
                .ok_or_else(|| CoordinationError::NotFound(email.to_string()).log())?
        };

        self.challenges
            .lock()
            .await
            .put(email, challenge.clone(), *PASSKEY_CHALLENGE_TIMEOUT);
        tracing::debug!("Issued login challenge for {}", email);

        Ok(CredentialChallenge {
            user: identity,
            challenge,
        })
    }

    /// Authenticate with an assertion over the challenge from `get_credential`.
    ///
    /// The pending challenge is consumed once client data presents it, whether
    /// or not the signature then verifies. Assertions over any other
    /// challenge leave it outstanding.
    pub async fn login(&self, request: LoginRequest) -> Result<Identity, CoordinationError> {
        let email = required(request.email, "email")?;
        let assertion = request
            .credential
            .ok_or_else(|| CoordinationError::MissingField("credential".to_string()).log())?;

        let identity = self
            .store
            .lock()
            .await
            .find_by_email(&email)
            .await?
            .ok_or_else(|| CoordinationError::NotFound(email.clone()).log())?;

        let Some(credential) = identity.credential.clone() else {
            return Err(
                CoordinationError::NotFound(format!("{email} has no bound credential")).log(),
            );
        };

        let decoded = assertion.decode()?;
        let client_data = ParsedClientData::from_bytes(&decoded.client_data_json)?;
        tracing::debug!("Parsed client data: {:?}", client_data);

        {
            let mut challenges = self.challenges.lock().await;
            let pending = challenges.peek(&email).ok_or_else(|| {
                CoordinationError::VerificationFailed(format!(
                    "No outstanding challenge for {email}"
                ))
                .log()
            })?;
            // Only an assertion over the outstanding challenge spends it
            client_data.verify(&pending.challenge)?;
            challenges.take(&email);
        }

        if !verify_assertion(&credential, &decoded) {
            return Err(CoordinationError::VerificationFailed(
                "Signature verification failed".to_string(),
            )
            .log());
        }

        tracing::info!("Identity {} authenticated", identity.id);
        Ok(identity)
    }

    /// Every identity, including ones still waiting for a credential
    pub async fn list(&self) -> Result<Vec<Identity>, CoordinationError> {
        Ok(self.store.lock().await.list().await?)
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, CoordinationError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CoordinationError::MissingField(field.to_string()).log())
}
