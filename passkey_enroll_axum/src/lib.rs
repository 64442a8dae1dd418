//! Axum integration for passkey-enroll
//!
//! Mounts the enrollment and login endpoints of a [`PasskeyFlow`] as an axum
//! [`Router`](axum::Router):
//!
//! - `POST /register/{email}`
//! - `POST /set-credential`
//! - `GET /get-credential/{email}`
//! - `POST /login`
//! - `GET /users`
//! - `GET /`
//!
//! ```no_run
//! use passkey_enroll_axum::{ENROLL_PORT, PasskeyFlow, enroll_router};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let app = enroll_router(PasskeyFlow::new());
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", *ENROLL_PORT)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod handlers;
mod response;
mod router;

pub use config::ENROLL_PORT;
pub use error::{ApiError, IntoResponseError};
pub use response::ApiResponse;
pub use router::{enroll_router, enroll_router_no_trace};

pub use passkey_enroll::PasskeyFlow;
