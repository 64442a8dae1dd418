//! Enrollment and authentication coordination
//!
//! `PasskeyFlow` is the entry point for every operation: it owns the identity
//! store and the outstanding login challenges and enforces the ordering
//! register → set credential → get credential → login.

mod errors;
mod flow;
mod types;

pub use errors::CoordinationError;
pub use flow::PasskeyFlow;
pub use types::{
    CredentialChallenge, LoginRequest, RegisterResponse, RegisteredUser, SetCredentialRequest,
};
