mod errors;
mod storage;
mod types;

pub use errors::IdentityError;
pub use storage::{IdentityStore, InMemoryIdentityStore};
pub use types::{EnrollmentState, Identity};
