//! Router for the enrollment endpoints

use axum::{
    Router,
    routing::{get, post},
};
use passkey_enroll::PasskeyFlow;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::handlers::{credential, live, login, register, set_credential, users};

/// Create the enrollment router with HTTP request tracing
pub fn enroll_router(flow: PasskeyFlow) -> Router {
    enroll_router_no_trace(flow).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as `enroll_router()` without the tracing middleware
pub fn enroll_router_no_trace(flow: PasskeyFlow) -> Router {
    Router::new()
        .route("/", get(live))
        .route("/register/{email}", post(register))
        .route("/set-credential", post(set_credential))
        .route("/get-credential/{email}", get(credential))
        .route("/login", post(login))
        .route("/users", get(users))
        .with_state(flow)
}
