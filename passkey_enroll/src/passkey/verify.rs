use sha2::{Digest, Sha256};

use super::public_key::PublicKey;
use super::types::{Credential, DecodedAssertion};

/// Verify a WebAuthn assertion signature.
///
/// The authenticator signs `authenticatorData || SHA-256(clientDataJSON)`.
/// Returns false on any failure; a bad signature and a malformed one are
/// indistinguishable to the caller.
pub fn verify_signature(
    public_key: &PublicKey,
    authenticator_data: &[u8],
    client_data_json: &[u8],
    signature: &[u8],
) -> bool {
    let client_data_hash = Sha256::digest(client_data_json);

    let mut signed_data = Vec::with_capacity(authenticator_data.len() + client_data_hash.len());
    signed_data.extend_from_slice(authenticator_data);
    signed_data.extend_from_slice(&client_data_hash);

    tracing::debug!(
        "Signed data length: {}, signature length: {}",
        signed_data.len(),
        signature.len()
    );

    match public_key.verify(&signed_data, signature) {
        Ok(()) => {
            tracing::info!("Signature verification successful");
            true
        }
        Err(e) => {
            tracing::warn!("Signature verification failed: {}", e);
            false
        }
    }
}

/// Verify a decoded assertion against a bound credential.
///
/// An undecodable stored key counts as a failed verification.
pub(crate) fn verify_assertion(credential: &Credential, assertion: &DecodedAssertion) -> bool {
    let public_key = match PublicKey::from_credential(credential) {
        Ok(key) => key,
        Err(e) => {
            tracing::error!("Stored public key is unusable: {}", e);
            return false;
        }
    };

    verify_signature(
        &public_key,
        &assertion.authenticator_data,
        &assertion.client_data_json,
        &assertion.signature,
    )
}
