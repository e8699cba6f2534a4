//! PostgreSQL backend

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{
    catalog::CatalogRepository, loans::LoansRepository, patrons::PatronsRepository, LibraryStore,
};
use crate::{
    error::AppResult,
    models::{CatalogRow, CheckedOut},
};

/// Store backed by a PostgreSQL connection pool
#[derive(Clone)]
pub struct PgStore {
    pub pool: Pool<Postgres>,
    pub patrons: PatronsRepository,
    pub catalog: CatalogRepository,
    pub loans: LoansRepository,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            patrons: PatronsRepository::new(pool.clone()),
            catalog: CatalogRepository::new(pool.clone()),
            loans: LoansRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl LibraryStore for PgStore {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn patron_exists(&self, name: &str, card_num: u32) -> AppResult<bool> {
        self.patrons.exists(name, card_num).await
    }

    async fn catalog_rows(&self) -> AppResult<Vec<CatalogRow>> {
        self.catalog.all_rows().await
    }

    async fn rows_for_card(&self, card_num: u32) -> AppResult<Vec<CatalogRow>> {
        self.catalog.rows_for_card(card_num).await
    }

    async fn copy_exists(&self, serial: u32) -> AppResult<bool> {
        self.loans.copy_exists(serial).await
    }

    async fn insert_loan(&self, loan: &CheckedOut) -> AppResult<bool> {
        self.loans.create(loan).await
    }

    async fn delete_loans(&self, serial: u32, card_num: u32) -> AppResult<u64> {
        self.loans.delete(serial, card_num).await
    }
}
