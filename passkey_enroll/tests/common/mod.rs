pub mod webauthn_helpers;

pub use webauthn_helpers::SoftAuthenticator;

use std::sync::Once;

/// Loads `.env_test` (falling back to `.env`) once per test binary, before
/// any configuration static is first read.
pub fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }
    });
}
