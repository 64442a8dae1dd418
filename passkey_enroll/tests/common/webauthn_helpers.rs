//! WebAuthn test helpers for creating signed assertions
//!
//! `SoftAuthenticator` holds a P-256 key pair and produces what a browser
//! returns from `navigator.credentials.get()`, base64url encoded. Its
//! credential carries the bare SEC1 point rather than an SPKI.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use passkey_enroll::{AssertionResponse, Credential, CredentialAlgorithm};
use ring::rand::SystemRandom;
use ring::signature::{ECDSA_P256_SHA256_ASN1_SIGNING, EcdsaKeyPair, KeyPair};
use sha2::{Digest, Sha256};

pub struct SoftAuthenticator {
    key_pair: EcdsaKeyPair,
    rng: SystemRandom,
}

impl SoftAuthenticator {
    pub fn new() -> Self {
        let rng = SystemRandom::new();
        let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, &rng)
            .expect("Failed to generate test key");
        let key_pair =
            EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, pkcs8.as_ref(), &rng)
                .expect("Failed to load test key");
        Self { key_pair, rng }
    }

    pub fn credential(&self) -> Credential {
        let point = self.key_pair.public_key().as_ref();

        let mut credential =
            Credential::new(URL_SAFE_NO_PAD.encode(point), CredentialAlgorithm::Es256);
        credential.credential_id = Some(URL_SAFE_NO_PAD.encode(b"soft-authenticator"));
        credential
    }

    pub fn sign(&self, authenticator_data: &[u8], client_data_json: &[u8]) -> Vec<u8> {
        let mut signed_data = authenticator_data.to_vec();
        signed_data.extend_from_slice(&Sha256::digest(client_data_json));
        self.key_pair
            .sign(&self.rng, &signed_data)
            .expect("Failed to sign")
            .as_ref()
            .to_vec()
    }

    pub fn assertion(&self, challenge: &str) -> AssertionResponse {
        let authenticator_data = authenticator_data();
        let client_data_json = client_data_json("webauthn.get", challenge);
        let signature = self.sign(&authenticator_data, &client_data_json);

        AssertionResponse {
            authenticator_data: URL_SAFE_NO_PAD.encode(authenticator_data),
            client_data_json: URL_SAFE_NO_PAD.encode(client_data_json),
            signature: URL_SAFE_NO_PAD.encode(signature),
        }
    }
}

/// rpIdHash(localhost) || flags(UP|UV) || counter(1)
pub fn authenticator_data() -> Vec<u8> {
    let mut data = Sha256::digest(b"localhost").to_vec();
    data.push(0x05);
    data.extend_from_slice(&1u32.to_be_bytes());
    data
}

/// Client data as a browser writes it: the challenge buffer is the ASCII
/// digits of the server challenge, base64url encoded.
pub fn client_data_json(type_: &str, challenge: &str) -> Vec<u8> {
    serde_json::json!({
        "type": type_,
        "challenge": URL_SAFE_NO_PAD.encode(challenge.as_bytes()),
        "origin": "http://localhost:3000"
    })
    .to_string()
    .into_bytes()
}
