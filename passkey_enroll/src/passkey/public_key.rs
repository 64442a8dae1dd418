use ciborium::value::{Integer, Value as CborValue};
use ring::signature::{self, RsaPublicKeyComponents, UnparsedPublicKey};
use x509_parser::prelude::FromDer;
use x509_parser::public_key::PublicKey as SpkiPublicKey;
use x509_parser::x509::SubjectPublicKeyInfo;

use super::errors::PasskeyError;
use super::types::{Credential, CredentialAlgorithm};
use crate::utils::base64url_decode;

/// COSE_Key labels (RFC 9053)
mod cose_label {
    pub(super) const KTY: i64 = 1;
    pub(super) const ALG: i64 = 3;
    pub(super) const EC2_CRV: i64 = -1;
    pub(super) const EC2_X: i64 = -2;
    pub(super) const EC2_Y: i64 = -3;
    pub(super) const RSA_N: i64 = -1;
    pub(super) const RSA_E: i64 = -2;

    pub(super) const KTY_EC2: i64 = 2;
    pub(super) const KTY_RSA: i64 = 3;
    pub(super) const CRV_P256: i64 = 1;
}

#[derive(Clone, Debug, PartialEq)]
enum KeyMaterial {
    /// Uncompressed SEC1 point (0x04 || x || y)
    EcPoint(Vec<u8>),
    /// DER encoded PKCS#1 RSAPublicKey
    RsaDer(Vec<u8>),
    /// Big-endian modulus and exponent without leading zeros
    RsaComponents { n: Vec<u8>, e: Vec<u8> },
}

/// Public key of a bound credential, decoded into the form ring verifies with.
#[derive(Clone, Debug, PartialEq)]
pub struct PublicKey {
    algorithm: CredentialAlgorithm,
    material: KeyMaterial,
}

impl PublicKey {
    pub fn from_credential(credential: &Credential) -> Result<Self, PasskeyError> {
        let bytes = base64url_decode(&credential.public_key)?;
        Self::decode(credential.algorithm, &bytes)
    }

    /// Decode key bytes in one of the encodings WebAuthn clients hand out:
    /// - SPKI DER, as returned by `AuthenticatorAttestationResponse.getPublicKey()`
    /// - COSE_Key CBOR, as embedded in attested credential data
    /// - the bare primitive form (SEC1 point or PKCS#1 RSAPublicKey)
    pub fn decode(algorithm: CredentialAlgorithm, bytes: &[u8]) -> Result<Self, PasskeyError> {
        let material = match bytes.first() {
            None => return Err(PasskeyError::Format("Empty public key".to_string())),
            // CBOR major type 5 (map)
            Some(0xa0..=0xbf) => decode_cose(algorithm, bytes)?,
            // DER SEQUENCE
            Some(0x30) => decode_der(algorithm, bytes)?,
            Some(_) => decode_raw(algorithm, bytes)?,
        };

        match (algorithm, &material) {
            (CredentialAlgorithm::Es256, KeyMaterial::EcPoint(_))
            | (CredentialAlgorithm::Rs256, KeyMaterial::RsaDer(_))
            | (CredentialAlgorithm::Rs256, KeyMaterial::RsaComponents { .. }) => {
                Ok(Self {
                    algorithm,
                    material,
                })
            }
            _ => Err(PasskeyError::Crypto(format!(
                "Key type does not match algorithm {}",
                algorithm.cose_id()
            ))),
        }
    }

    pub fn algorithm(&self) -> CredentialAlgorithm {
        self.algorithm
    }

    /// Verify `signature` over `message`.
    ///
    /// ES256 signatures are ASN.1 DER, which is what authenticators emit.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), PasskeyError> {
        let result = match &self.material {
            KeyMaterial::EcPoint(point) => {
                UnparsedPublicKey::new(&signature::ECDSA_P256_SHA256_ASN1, point)
                    .verify(message, signature)
            }
            KeyMaterial::RsaDer(der) => {
                UnparsedPublicKey::new(&signature::RSA_PKCS1_2048_8192_SHA256, der)
                    .verify(message, signature)
            }
            KeyMaterial::RsaComponents { n, e } => RsaPublicKeyComponents {
                n: n.as_slice(),
                e: e.as_slice(),
            }
            .verify(&signature::RSA_PKCS1_2048_8192_SHA256, message, signature),
        };

        result.map_err(|_| {
            PasskeyError::Verification(
                "Signature verification failed. For more details, run with RUST_LOG=debug".into(),
            )
        })
    }
}

fn decode_raw(algorithm: CredentialAlgorithm, bytes: &[u8]) -> Result<KeyMaterial, PasskeyError> {
    match algorithm {
        CredentialAlgorithm::Es256 if bytes.len() == 65 && bytes[0] == 0x04 => {
            Ok(KeyMaterial::EcPoint(bytes.to_vec()))
        }
        CredentialAlgorithm::Rs256 if bytes.first() == Some(&0x30) => {
            Ok(KeyMaterial::RsaDer(bytes.to_vec()))
        }
        _ => Err(PasskeyError::Format(format!(
            "Unrecognized {} byte public key",
            bytes.len()
        ))),
    }
}

fn decode_der(algorithm: CredentialAlgorithm, bytes: &[u8]) -> Result<KeyMaterial, PasskeyError> {
    let spki = match SubjectPublicKeyInfo::from_der(bytes) {
        Ok((_, spki)) => spki,
        // A bare PKCS#1 RSAPublicKey is a DER SEQUENCE too
        Err(_) if algorithm == CredentialAlgorithm::Rs256 => return decode_raw(algorithm, bytes),
        Err(e) => {
            return Err(PasskeyError::Format(format!(
                "Invalid SubjectPublicKeyInfo: {e}"
            )));
        }
    };

    match spki.parsed() {
        Ok(SpkiPublicKey::EC(point)) => decode_raw(CredentialAlgorithm::Es256, point.data()),
        Ok(SpkiPublicKey::RSA(rsa)) => Ok(KeyMaterial::RsaComponents {
            n: strip_leading_zeros(rsa.modulus),
            e: strip_leading_zeros(rsa.exponent),
        }),
        Ok(_) => Err(PasskeyError::Crypto(
            "Unsupported SubjectPublicKeyInfo key type".to_string(),
        )),
        Err(e) => Err(PasskeyError::Format(format!(
            "Invalid SubjectPublicKeyInfo key: {e}"
        ))),
    }
}

fn decode_cose(algorithm: CredentialAlgorithm, bytes: &[u8]) -> Result<KeyMaterial, PasskeyError> {
    let value: CborValue = ciborium::de::from_reader(bytes).map_err(|e| {
        tracing::error!("Invalid public key CBOR: {}", e);
        PasskeyError::Format(format!("Invalid public key CBOR: {}", e))
    })?;

    let CborValue::Map(entries) = value else {
        return Err(PasskeyError::Format("COSE key is not a map".to_string()));
    };

    let lookup = |label: i64| {
        entries
            .iter()
            .find(|(k, _)| matches!(k, CborValue::Integer(i) if *i == Integer::from(label)))
            .map(|(_, v)| v)
    };
    let int_at = |label: i64| match lookup(label) {
        Some(CborValue::Integer(i)) => Some(*i),
        _ => None,
    };
    let bytes_at = |label: i64| match lookup(label) {
        Some(CborValue::Bytes(b)) => Some(b.clone()),
        _ => None,
    };

    if let Some(alg) = int_at(cose_label::ALG) {
        if alg != Integer::from(algorithm.cose_id()) {
            return Err(PasskeyError::Crypto(
                "COSE key algorithm does not match credential algorithm".to_string(),
            ));
        }
    }

    let kty = int_at(cose_label::KTY)
        .ok_or_else(|| PasskeyError::Format("COSE key without kty".to_string()))?;

    if kty == Integer::from(cose_label::KTY_EC2) {
        if int_at(cose_label::EC2_CRV) != Some(Integer::from(cose_label::CRV_P256)) {
            return Err(PasskeyError::Crypto("Unsupported EC2 curve".to_string()));
        }
        match (bytes_at(cose_label::EC2_X), bytes_at(cose_label::EC2_Y)) {
            (Some(x), Some(y)) if x.len() == 32 && y.len() == 32 => {
                let mut point = Vec::with_capacity(65);
                point.push(0x04); // Uncompressed point format
                point.extend_from_slice(&x);
                point.extend_from_slice(&y);
                Ok(KeyMaterial::EcPoint(point))
            }
            _ => Err(PasskeyError::Format(
                "Missing or invalid key coordinates".to_string(),
            )),
        }
    } else if kty == Integer::from(cose_label::KTY_RSA) {
        match (bytes_at(cose_label::RSA_N), bytes_at(cose_label::RSA_E)) {
            (Some(n), Some(e)) => Ok(KeyMaterial::RsaComponents {
                n: strip_leading_zeros(&n),
                e: strip_leading_zeros(&e),
            }),
            _ => Err(PasskeyError::Format(
                "Missing RSA modulus or exponent".to_string(),
            )),
        }
    } else {
        Err(PasskeyError::Crypto("Unsupported COSE key type".to_string()))
    }
}

fn strip_leading_zeros(bytes: &[u8]) -> Vec<u8> {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    bytes[start..].to_vec()
}
