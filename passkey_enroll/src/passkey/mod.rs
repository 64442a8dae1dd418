mod bind;
mod errors;
mod options;
mod public_key;
mod types;
mod verify;

pub use errors::PasskeyError;
pub use options::RegistrationOptions;
pub use public_key::PublicKey;
pub use types::{AssertionResponse, Credential, CredentialAlgorithm};
pub use verify::verify_signature;

pub(crate) use bind::bind_credential;
pub(crate) use types::ParsedClientData;
pub(crate) use verify::verify_assertion;
