use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde_json::{Value, json};

use passkey_enroll::{
    CredentialChallenge, Identity, LoginRequest, PasskeyFlow, RegisterResponse,
    SetCredentialRequest,
};

use crate::error::{ApiError, IntoResponseError};
use crate::response::ApiResponse;

pub(crate) async fn live() -> Json<Value> {
    Json(json!({ "message": "API is Live!" }))
}

pub(crate) async fn register(
    State(flow): State<PasskeyFlow>,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<RegisterResponse>>, ApiError> {
    let registered = flow.register(&email).await.into_response_error()?;
    Ok(Json(ApiResponse::ok(
        "User registered successfully",
        registered,
    )))
}

pub(crate) async fn set_credential(
    State(flow): State<PasskeyFlow>,
    payload: Result<Json<SetCredentialRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(request) = payload?;
    let message = flow.set_credential(request).await.into_response_error()?;
    Ok(Json(ApiResponse::message(message)))
}

pub(crate) async fn credential(
    State(flow): State<PasskeyFlow>,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<CredentialChallenge>>, ApiError> {
    let found = flow.get_credential(&email).await.into_response_error()?;
    Ok(Json(ApiResponse::ok(
        "User credentials retrieved successfully",
        found,
    )))
}

pub(crate) async fn login(
    State(flow): State<PasskeyFlow>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Identity>>, ApiError> {
    let Json(request) = payload?;
    let identity = flow.login(request).await.into_response_error()?;
    Ok(Json(ApiResponse::ok("Logged in successfully", identity)))
}

pub(crate) async fn users(
    State(flow): State<PasskeyFlow>,
) -> Result<Json<ApiResponse<Vec<Identity>>>, ApiError> {
    let identities = flow.list().await.into_response_error()?;
    Ok(Json(ApiResponse::ok(
        "Users retrieved successfully",
        identities,
    )))
}
