//! Central configuration for the passkey_enroll crate

use std::{env, sync::LazyLock};

/// Number of decimal digits in a generated identity id
///
/// Default: 9
pub static ENROLL_ID_LENGTH: LazyLock<usize> =
    LazyLock::new(|| parse_or("ENROLL_ID_LENGTH", 9));

/// Number of decimal digits in a challenge handed out by register and get-credential
///
/// Default: 9
pub static ENROLL_CHALLENGE_LENGTH: LazyLock<usize> =
    LazyLock::new(|| parse_or("ENROLL_CHALLENGE_LENGTH", 9));

/// Seconds an authentication challenge stays valid after get-credential
pub(crate) static PASSKEY_CHALLENGE_TIMEOUT: LazyLock<u64> =
    LazyLock::new(|| parse_or("PASSKEY_CHALLENGE_TIMEOUT", 60));

/// Seconds the client is given to complete the credential creation ceremony
pub(crate) static PASSKEY_TIMEOUT: LazyLock<u32> = LazyLock::new(|| parse_or("PASSKEY_TIMEOUT", 60));

pub(crate) static PASSKEY_RP_ID: LazyLock<String> =
    LazyLock::new(|| env::var("PASSKEY_RP_ID").unwrap_or_else(|_| "localhost".to_string()));

pub(crate) static PASSKEY_RP_NAME: LazyLock<String> = LazyLock::new(|| {
    env::var("PASSKEY_RP_NAME").unwrap_or_else(|_| "Biometric Web App".to_string())
});

fn parse_or<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match env::var(name) {
        Ok(v) => v.parse::<T>().unwrap_or_else(|_| {
            tracing::warn!("Invalid {}: {}. Using default {}", name, v, default);
            default
        }),
        Err(_) => default,
    }
}
