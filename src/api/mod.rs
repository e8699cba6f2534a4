//! API handlers for the library REST endpoints

pub mod auth;
pub mod catalog;
pub mod health;
pub mod loans;
pub mod openapi;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::Session,
    AppState,
};

/// Body returned by every mutating operation
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Read the session token from `Authorization: Bearer <token>`, if present
pub fn session_token(headers: &HeaderMap) -> AppResult<Option<Uuid>> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_header = value
        .to_str()
        .map_err(|_| AppError::BadRequest("Invalid authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::BadRequest("Invalid authorization header format".to_string()))?;

    Uuid::parse_str(token.trim())
        .map(Some)
        .map_err(|_| AppError::BadRequest("Malformed session token".to_string()))
}

/// Extractor for the logged-in patron; rejects requests without a live session
pub struct ActiveSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for ActiveSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers)?
            .ok_or_else(|| AppError::Authentication("Not logged in".to_string()))?;

        let session = state.services.sessions.current(token).await?;
        Ok(ActiveSession(session))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Session
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/session", get(auth::session))
        // Catalog
        .route("/titles", get(catalog::list_all_titles))
        .route("/my-books", get(catalog::list_my_books))
        // Circulation
        .route("/loans/checkout", post(loans::check_out_book))
        .route("/loans/return", post(loans::return_book))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
