use serde::Serialize;

use crate::config::{PASSKEY_RP_ID, PASSKEY_RP_NAME, PASSKEY_TIMEOUT};
use crate::identity::Identity;

use super::types::CredentialAlgorithm;

#[derive(Serialize, Debug, Clone)]
pub struct RelyingParty {
    pub name: String,
    pub id: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserEntity {
    pub id: String,
    pub name: String,
    pub display_name: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct PubKeyCredParam {
    #[serde(rename = "type")]
    pub type_: String,
    pub alg: i64,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatorSelection {
    pub user_verification: String,
}

/// `PublicKeyCredentialCreationOptions` for the client's `navigator.credentials.create()`.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationOptions {
    pub challenge: String,
    pub rp: RelyingParty,
    pub user: UserEntity,
    pub pub_key_cred_params: Vec<PubKeyCredParam>,
    pub authenticator_selection: AuthenticatorSelection,
    /// Milliseconds
    pub timeout: u32,
    pub attestation: String,
}

impl RegistrationOptions {
    pub(crate) fn new(identity: &Identity, challenge: &str) -> Self {
        Self {
            challenge: challenge.to_string(),
            rp: RelyingParty {
                name: PASSKEY_RP_NAME.to_string(),
                id: PASSKEY_RP_ID.to_string(),
            },
            user: UserEntity {
                id: identity.id.clone(),
                name: identity.email.clone(),
                display_name: identity.email.clone(),
            },
            pub_key_cred_params: vec![PubKeyCredParam {
                type_: "public-key".to_string(),
                alg: CredentialAlgorithm::Es256.cose_id(),
            }],
            authenticator_selection: AuthenticatorSelection {
                user_verification: "preferred".to_string(),
            },
            timeout: timeout_millis(*PASSKEY_TIMEOUT),
            attestation: "direct".to_string(),
        }
    }
}

/// Seconds to milliseconds, pinned at `u32::MAX`
fn timeout_millis(seconds: u32) -> u32 {
    seconds.saturating_mul(1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_options_wire_format() {
        let identity = Identity::new("123456789".to_string(), "a@b.com".to_string());
        let options = RegistrationOptions::new(&identity, "987654321");
        let value = serde_json::to_value(&options).unwrap();

        assert_eq!(value["challenge"], "987654321");
        assert_eq!(value["user"]["id"], "123456789");
        assert_eq!(value["user"]["displayName"], "a@b.com");
        assert_eq!(value["pubKeyCredParams"][0]["alg"], -7);
        assert_eq!(value["pubKeyCredParams"][0]["type"], "public-key");
        assert_eq!(value["authenticatorSelection"]["userVerification"], "preferred");
        assert_eq!(value["attestation"], "direct");
    }

    #[test]
    fn test_timeout_millis_saturates() {
        assert_eq!(timeout_millis(60), 60_000);
        assert_eq!(timeout_millis(4_294_968), u32::MAX);
        assert_eq!(timeout_millis(u32::MAX), u32::MAX);
    }
}
