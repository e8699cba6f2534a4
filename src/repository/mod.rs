//! Repository layer for store operations
//!
//! Services talk to the store through [`LibraryStore`]. Two backends exist:
//! [`postgres::PgStore`] over a `sqlx` pool and [`memory::MemoryStore`]
//! holding the four tables in process.

pub mod catalog;
pub mod loans;
pub mod memory;
pub mod patrons;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{CatalogRow, CheckedOut},
};

/// Queries and mutations the circulation core needs from the store.
///
/// Every method is a single statement; none of them open a transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// Cheap connectivity check used by the readiness probe
    async fn ping(&self) -> AppResult<()>;

    /// Whether a patron with exactly this name and card number exists
    async fn patron_exists(&self, name: &str, card_num: u32) -> AppResult<bool>;

    /// Full left join titles -> inventory -> checked_out -> patrons
    async fn catalog_rows(&self) -> AppResult<Vec<CatalogRow>>;

    /// The same join restricted to rows whose borrower holds `card_num`
    async fn rows_for_card(&self, card_num: u32) -> AppResult<Vec<CatalogRow>>;

    async fn copy_exists(&self, serial: u32) -> AppResult<bool>;

    /// Record a loan unless the copy is already on loan, in one statement.
    /// Returns `false` when an existing loan blocked the insert.
    async fn insert_loan(&self, loan: &CheckedOut) -> AppResult<bool>;

    /// Delete every loan matching (serial, card), returning how many went away
    async fn delete_loans(&self, serial: u32, card_num: u32) -> AppResult<u64>;
}

/// Shared handle to whichever backend is configured
pub type Repository = Arc<dyn LibraryStore>;

/// Create a repository backed by the given PostgreSQL pool
pub fn postgres(pool: Pool<Postgres>) -> Repository {
    Arc::new(postgres::PgStore::new(pool))
}

/// Create a repository backed by an in-memory store
pub fn memory(store: memory::MemoryStore) -> Repository {
    Arc::new(store)
}

/// Narrow a BIGINT column to the unsigned 32-bit range used for serials and card numbers
pub(crate) fn to_u32(value: i64, column: &str) -> AppResult<u32> {
    u32::try_from(value)
        .map_err(|_| AppError::Internal(format!("{} value {} is out of range", column, value)))
}
