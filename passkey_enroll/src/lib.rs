//! passkey_enroll - In-memory passkey enrollment and authentication
//!
//! This crate implements a three step flow: an identity is registered by email,
//! a public-key credential is bound to it once, and later logins present a
//! WebAuthn-style assertion whose signature is checked against the bound key.

mod challenge;
mod config;
mod coordination;
mod identity;
mod passkey;
mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use challenge::generate_digits;
pub use config::{ENROLL_CHALLENGE_LENGTH, ENROLL_ID_LENGTH};

pub use coordination::{
    CoordinationError, CredentialChallenge, LoginRequest, PasskeyFlow, RegisterResponse,
    RegisteredUser, SetCredentialRequest,
};

pub use identity::{EnrollmentState, Identity, IdentityError, IdentityStore, InMemoryIdentityStore};

pub use passkey::{
    AssertionResponse, Credential, CredentialAlgorithm, PasskeyError, PublicKey,
    RegistrationOptions, verify_signature,
};

pub use utils::{UtilError, base64url_decode, base64url_encode};
