//! Login, registration and current-user endpoints

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use td_core::wire::{AuthResponse, MessageResponse, UserProfile};

use crate::auth::Registration;
use crate::error::ApiResult;
use crate::extract::AppJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    profile_picture: Option<String>,
}

async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    state.simulate_latency().await;
    let user = state.users().login(&req.email, &req.password).await?;
    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(AuthResponse {
        success: true,
        message: "Login successful!".to_string(),
        user,
    }))
}

async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> ApiResult<Json<AuthResponse>> {
    state.simulate_latency().await;
    let user = state
        .users()
        .register(Registration {
            email: req.email,
            password: req.password,
            role: req.role,
            profile_picture: req.profile_picture,
        })
        .await?;
    tracing::info!(user_id = user.id, "User registered");

    Ok(Json(AuthResponse {
        success: true,
        message: "Registration successful!".to_string(),
        user,
    }))
}

async fn logout(State(state): State<AppState>) -> Json<MessageResponse> {
    state.users().logout().await;
    Json(MessageResponse::ok("Logged out successfully"))
}

async fn me(State(state): State<AppState>) -> ApiResult<Json<UserProfile>> {
    Ok(Json(state.users().current_user().await?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/register", post(register))
        .route("/api/logout", post(logout))
        .route("/api/me", get(me))
}
