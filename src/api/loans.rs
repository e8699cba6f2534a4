//! Check-out and return endpoints

use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{error::AppResult, AppState};

use super::{ActiveSession, SuccessResponse};

/// Copy selection for check-out and return
#[derive(Deserialize, ToSchema)]
pub struct SerialRequest {
    /// Serial number of the copy
    pub serial: u32,
}

/// Check a copy out to the logged-in patron
#[utoipa::path(
    post,
    path = "/loans/checkout",
    tag = "loans",
    security(("bearer_auth" = [])),
    request_body = SerialRequest,
    responses(
        (status = 200, description = "Copy checked out", body = SuccessResponse),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "No such copy"),
        (status = 409, description = "Copy already checked out")
    )
)]
pub async fn check_out_book(
    State(state): State<AppState>,
    ActiveSession(session): ActiveSession,
    Json(request): Json<SerialRequest>,
) -> AppResult<Json<SuccessResponse>> {
    state.services.loans.check_out(&session, request.serial).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Return a copy held by the logged-in patron
#[utoipa::path(
    post,
    path = "/loans/return",
    tag = "loans",
    security(("bearer_auth" = [])),
    request_body = SerialRequest,
    responses(
        (status = 200, description = "Copy returned, or nothing to return", body = SuccessResponse),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn return_book(
    State(state): State<AppState>,
    ActiveSession(session): ActiveSession,
    Json(request): Json<SerialRequest>,
) -> AppResult<Json<SuccessResponse>> {
    state.services.loans.return_book(&session, request.serial).await?;
    Ok(Json(SuccessResponse::ok()))
}
