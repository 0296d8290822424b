//! Admin authentication endpoints
//!
//! Password check issues a bearer token held in the in-process session
//! store; verify evicts expired tokens on check.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub message: String,
}

/// POST /api/admin/login
pub async fn admin_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    if request.password != state.admin_password {
        warn!("Admin login attempt with wrong password");
        return Err(ApiError::Unauthorized("Invalid password".to_string()));
    }

    let token = state.sessions.create();
    Ok(Json(LoginResponse {
        success: true,
        token,
        message: "Login successful".to_string(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    pub token: String,
}

/// GET /api/admin/verify?token=...
pub async fn verify_admin_token(
    State(state): State<AppState>,
    Query(query): Query<VerifyQuery>,
) -> ApiResult<Json<Value>> {
    if !state.sessions.verify(&query.token) {
        return Err(ApiError::Unauthorized(
            "Invalid or expired token".to_string(),
        ));
    }
    Ok(Json(json!({ "valid": true })))
}
