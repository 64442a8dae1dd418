use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::PasskeyError;
use crate::utils::{base64url_decode, base64url_encode};

/// COSE algorithm identifiers accepted for bound credentials.
///
/// Both are SHA-256 based; registration options only advertise ES256.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum CredentialAlgorithm {
    /// ECDSA over P-256 with SHA-256 (COSE -7)
    #[default]
    Es256,
    /// RSASSA-PKCS1-v1_5 with SHA-256 (COSE -257)
    Rs256,
}

impl CredentialAlgorithm {
    pub fn cose_id(self) -> i64 {
        match self {
            Self::Es256 => -7,
            Self::Rs256 => -257,
        }
    }
}

impl TryFrom<i64> for CredentialAlgorithm {
    type Error = PasskeyError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -7 => Ok(Self::Es256),
            -257 => Ok(Self::Rs256),
            other => Err(PasskeyError::Crypto(format!(
                "Unsupported COSE algorithm: {other}"
            ))),
        }
    }
}

impl From<CredentialAlgorithm> for i64 {
    fn from(alg: CredentialAlgorithm) -> Self {
        alg.cose_id()
    }
}

/// Public-key credential bound to an identity.
///
/// `public_key` is base64url key material in any form `PublicKey::decode`
/// understands (SPKI DER, COSE_Key, or the raw primitive encoding).
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
    pub public_key: String,
    #[serde(default)]
    pub algorithm: CredentialAlgorithm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_at: Option<DateTime<Utc>>,
}

impl Credential {
    pub fn new(public_key: String, algorithm: CredentialAlgorithm) -> Self {
        Self {
            credential_id: None,
            public_key,
            algorithm,
            bound_at: None,
        }
    }
}

/// Assertion produced by the authenticator at login, fields base64url encoded.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AssertionResponse {
    pub authenticator_data: String,
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String,
    pub signature: String,
}

#[derive(Debug)]
pub(crate) struct DecodedAssertion {
    pub(crate) authenticator_data: Vec<u8>,
    pub(crate) client_data_json: Vec<u8>,
    pub(crate) signature: Vec<u8>,
}

impl AssertionResponse {
    pub(crate) fn decode(&self) -> Result<DecodedAssertion, PasskeyError> {
        let decode = |field: &str, value: &str| {
            base64url_decode(value)
                .map_err(|e| PasskeyError::Format(format!("Invalid {field}: {e}")))
        };

        Ok(DecodedAssertion {
            authenticator_data: decode("authenticatorData", &self.authenticator_data)?,
            client_data_json: decode("clientDataJSON", &self.client_data_json)?,
            signature: decode("signature", &self.signature)?,
        })
    }
}

#[derive(Debug)]
pub(crate) struct ParsedClientData {
    pub(crate) challenge: String,
    pub(crate) type_: String,
}

impl ParsedClientData {
    pub(crate) fn from_bytes(raw: &[u8]) -> Result<Self, PasskeyError> {
        let data: serde_json::Value = serde_json::from_slice(raw)
            .map_err(|e| PasskeyError::Format(format!("Invalid JSON: {}", e)))?;

        Ok(Self {
            challenge: data["challenge"]
                .as_str()
                .ok_or_else(|| PasskeyError::ClientData("Missing challenge".into()))?
                .to_string(),
            type_: data["type"]
                .as_str()
                .ok_or_else(|| PasskeyError::ClientData("Missing type".into()))?
                .to_string(),
        })
    }

    /// Check the ceremony type and that the challenge is the one we issued.
    ///
    /// Browsers base64url encode the challenge buffer into client data, and the
    /// client turns our decimal challenge into that buffer as ASCII bytes.
    pub(crate) fn verify(&self, issued_challenge: &str) -> Result<(), PasskeyError> {
        if self.type_ != "webauthn.get" {
            return Err(PasskeyError::ClientData(format!(
                "Invalid type. Expected 'webauthn.get', Got: {}",
                self.type_
            )));
        }

        if self.challenge != base64url_encode(issued_challenge.as_bytes()) {
            return Err(PasskeyError::Challenge(
                "Challenge mismatch. For more details, run with RUST_LOG=debug".into(),
            ));
        }

        Ok(())
    }
}
