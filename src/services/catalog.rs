//! Catalog browsing service

use crate::{
    error::AppResult,
    models::{MyBook, Session, TitleListing},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Every title, once per copy, with the current borrower's name (or "")
    pub async fn list_all_titles(&self) -> AppResult<Vec<TitleListing>> {
        let rows = self.repository.catalog_rows().await?;
        Ok(rows.into_iter().map(TitleListing::from).collect())
    }

    /// Copies currently held by the session's patron
    pub async fn list_my_books(&self, session: &Session) -> AppResult<Vec<MyBook>> {
        let rows = self.repository.rows_for_card(session.card_num).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| MyBook::from_row(row, session.card_num))
            .collect())
    }
}
