use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::passkey::Credential;

/// Where an identity sits in the enrollment flow.
///
/// An email that was never registered has no `Identity` at all, so only the
/// two stored states are represented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentState {
    /// Registered, waiting for a credential
    Registered,
    /// Credential bound, eligible for login
    Enrolled,
}

/// A registered identity.
///
/// `id` is a random decimal string and is not guaranteed to be unique.
/// `email` is the lookup key; several identities may share it, in which case
/// the earliest one wins every lookup.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub email: String,
    #[serde(rename = "credentials", default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<Credential>,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    pub fn new(id: String, email: String) -> Self {
        Self {
            id,
            email,
            credential: None,
            created_at: Utc::now(),
        }
    }

    pub fn state(&self) -> EnrollmentState {
        match self.credential {
            Some(_) => EnrollmentState::Enrolled,
            None => EnrollmentState::Registered,
        }
    }

    pub fn is_enrolled(&self) -> bool {
        self.state() == EnrollmentState::Enrolled
    }
}
