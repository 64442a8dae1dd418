//! Test utilities shared by this crate's unit tests and, behind the
//! `test-utils` feature, by dependent crates' tests
//!
//! `TestAuthenticator` plays the role of a platform authenticator: it owns a
//! P-256 key pair, hands out the public key in each supported encoding, and
//! signs assertions the way a browser-side WebAuthn client would.

use ciborium::value::Value as CborValue;
use ring::rand::SystemRandom;
use ring::signature::{ECDSA_P256_SHA256_ASN1_SIGNING, EcdsaKeyPair, KeyPair};
use sha2::{Digest, Sha256};

use crate::passkey::{AssertionResponse, Credential, CredentialAlgorithm};
use crate::utils::base64url_encode;

/// DER prefix of a P-256 SubjectPublicKeyInfo, followed by the 65 byte point
const P256_SPKI_PREFIX: [u8; 26] = [
    0x30, 0x59, 0x30, 0x13, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x08,
    0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07, 0x03, 0x42, 0x00,
];

pub struct TestAuthenticator {
    key_pair: EcdsaKeyPair,
    rng: SystemRandom,
}

impl Default for TestAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAuthenticator {
    pub fn new() -> Self {
        let rng = SystemRandom::new();
        let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, &rng)
            .expect("Failed to generate test key");
        let key_pair =
            EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, pkcs8.as_ref(), &rng)
                .expect("Failed to load test key");
        Self { key_pair, rng }
    }

    pub fn public_key_raw(&self) -> Vec<u8> {
        self.key_pair.public_key().as_ref().to_vec()
    }

    pub fn public_key_spki(&self) -> Vec<u8> {
        let mut spki = P256_SPKI_PREFIX.to_vec();
        spki.extend_from_slice(self.key_pair.public_key().as_ref());
        spki
    }

    pub fn public_key_cose(&self) -> Vec<u8> {
        let point = self.public_key_raw();
        let key = CborValue::Map(vec![
            (CborValue::Integer(1.into()), CborValue::Integer(2.into())),
            (CborValue::Integer(3.into()), CborValue::Integer((-7).into())),
            (CborValue::Integer((-1).into()), CborValue::Integer(1.into())),
            (
                CborValue::Integer((-2).into()),
                CborValue::Bytes(point[1..33].to_vec()),
            ),
            (
                CborValue::Integer((-3).into()),
                CborValue::Bytes(point[33..65].to_vec()),
            ),
        ]);
        let mut bytes = Vec::new();
        ciborium::ser::into_writer(&key, &mut bytes).expect("Failed to encode COSE key");
        bytes
    }

    /// Credential carrying the SPKI encoding browsers expose through `getPublicKey()`
    pub fn credential(&self) -> Credential {
        Credential::new(
            base64url_encode(&self.public_key_spki()),
            CredentialAlgorithm::Es256,
        )
    }

    pub fn cose_credential(&self) -> Credential {
        Credential::new(
            base64url_encode(&self.public_key_cose()),
            CredentialAlgorithm::Es256,
        )
    }

    pub fn sign_raw(&self, message: &[u8]) -> Vec<u8> {
        self.key_pair
            .sign(&self.rng, message)
            .expect("Failed to sign")
            .as_ref()
            .to_vec()
    }

    pub fn sign(&self, authenticator_data: &[u8], client_data_json: &[u8]) -> Vec<u8> {
        let mut signed_data = authenticator_data.to_vec();
        signed_data.extend_from_slice(&Sha256::digest(client_data_json));
        self.sign_raw(&signed_data)
    }

    /// Assertion over `challenge` as a browser would produce it for login
    pub fn assertion(&self, challenge: &str) -> AssertionResponse {
        let authenticator_data = test_authenticator_data();
        let client_data_json = test_client_data_json(challenge);
        let signature = self.sign(&authenticator_data, &client_data_json);

        AssertionResponse {
            authenticator_data: base64url_encode(&authenticator_data),
            client_data_json: base64url_encode(&client_data_json),
            signature: base64url_encode(&signature),
        }
    }
}

/// rpIdHash(localhost) || flags(UP|UV) || counter(1)
pub fn test_authenticator_data() -> Vec<u8> {
    let mut data = Sha256::digest(b"localhost").to_vec();
    data.push(0x05);
    data.extend_from_slice(&1u32.to_be_bytes());
    data
}

pub fn test_client_data_json(challenge: &str) -> Vec<u8> {
    serde_json::json!({
        "type": "webauthn.get",
        "challenge": base64url_encode(challenge.as_bytes()),
        "origin": "http://localhost:3000",
        "crossOrigin": false,
    })
    .to_string()
    .into_bytes()
}
