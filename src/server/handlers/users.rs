//! Account handlers: register, login, current user.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::account::User;
use crate::server::state::AppState;

use super::{authenticate, ApiError};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
}

/// POST /api/users/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    if state.users.by_email(&req.email).await.is_some() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Email already registered" })),
        ));
    }
    let user = User::new(req.name, req.email);
    let token = state.users.register(user.clone()).await;
    println!("[server] registered user {} ({})", user.id, user.email);
    Ok((StatusCode::CREATED, Json(json!({ "token": token, "user": user }))))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

/// POST /api/users/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = state.users.by_email(&req.email).await.ok_or((
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Unknown email" })),
    ))?;
    let token = state
        .users
        .login(user.id)
        .await
        .map_err(super::error_response)?;
    Ok(Json(json!({ "token": token, "user": user })))
}

/// GET /api/users/me
pub async fn me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<User>, ApiError> {
    let user = authenticate(&state, &headers).await?;
    Ok(Json(user))
}
