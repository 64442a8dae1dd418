use serde::{Deserialize, Serialize};

use crate::identity::Identity;
use crate::passkey::{AssertionResponse, Credential, RegistrationOptions};

/// Public part of a freshly registered identity
#[derive(Clone, Serialize, Debug)]
pub struct RegisteredUser {
    pub id: String,
    pub email: String,
}

#[derive(Clone, Serialize, Debug)]
pub struct RegisterResponse {
    pub user: RegisteredUser,
    pub challenge: String,
    pub options: RegistrationOptions,
}

/// Body of a set-credential request. Both fields are required; they are
/// optional here so a missing one surfaces as `MissingField`.
#[derive(Clone, Deserialize, Debug, Default)]
pub struct SetCredentialRequest {
    pub email: Option<String>,
    pub credentials: Option<Credential>,
}

#[derive(Clone, Serialize, Debug)]
pub struct CredentialChallenge {
    pub user: Identity,
    pub challenge: String,
}

#[derive(Clone, Deserialize, Debug, Default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub credential: Option<AssertionResponse>,
}
