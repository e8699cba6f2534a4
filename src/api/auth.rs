//! Login, logout and session endpoints

use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, models::Session, AppState};

use super::{session_token, ActiveSession, SuccessResponse};

/// Login request
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Patron name, matched exactly
    pub name: String,
    /// Library card number
    pub card_num: i64,
}

/// Login response
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    /// Session token to send as `Authorization: Bearer <token>`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Log a patron in by name and card number
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login outcome; success is false when no patron matches", body = LoginResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let existing = session_token(&headers).ok().flatten();

    let session = state
        .services
        .sessions
        .login(&request.name, request.card_num, existing)
        .await?;

    Ok(Json(LoginResponse {
        success: session.is_some(),
        token: session.map(|s| s.token.to_string()),
    }))
}

/// Log out the presented session; always succeeds
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logged out", body = SuccessResponse)
    )
)]
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<SuccessResponse> {
    let token = session_token(&headers).ok().flatten();
    state.services.sessions.logout(token).await;
    Json(SuccessResponse::ok())
}

/// Current session details
#[utoipa::path(
    get,
    path = "/auth/session",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active session", body = Session),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn session(ActiveSession(session): ActiveSession) -> Json<Session> {
    Json(session)
}
