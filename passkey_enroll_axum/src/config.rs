//! Central configuration for the passkey_enroll_axum crate

use std::sync::LazyLock;

/// Port the HTTP server listens on
/// Default: 3000
pub static ENROLL_PORT: LazyLock<u16> =
    LazyLock::new(|| parse_port(std::env::var("PORT").ok().as_deref()));

fn parse_port(value: Option<&str>) -> u16 {
    match value {
        Some(v) => v.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid PORT: {}. Using default 3000", v);
            3000
        }),
        None => 3000,
    }
}
