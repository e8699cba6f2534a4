//! Catalog endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{MyBook, TitleListing},
    AppState,
};

use super::ActiveSession;

/// List every title with its copies and current borrowers
#[utoipa::path(
    get,
    path = "/titles",
    tag = "catalog",
    responses(
        (status = 200, description = "All titles, one entry per copy", body = Vec<TitleListing>)
    )
)]
pub async fn list_all_titles(State(state): State<AppState>) -> AppResult<Json<Vec<TitleListing>>> {
    let titles = state.services.catalog.list_all_titles().await?;
    Ok(Json(titles))
}

/// List the books checked out by the logged-in patron
#[utoipa::path(
    get,
    path = "/my-books",
    tag = "catalog",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Books on loan to the patron", body = Vec<MyBook>),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn list_my_books(
    State(state): State<AppState>,
    ActiveSession(session): ActiveSession,
) -> AppResult<Json<Vec<MyBook>>> {
    let books = state.services.catalog.list_my_books(&session).await?;
    Ok(Json(books))
}
