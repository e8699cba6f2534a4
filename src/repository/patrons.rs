//! Patrons repository for database operations

use sqlx::{Pool, Postgres};

use crate::error::AppResult;

#[derive(Clone)]
pub struct PatronsRepository {
    pool: Pool<Postgres>,
}

impl PatronsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Exact match on both name and card number
    pub async fn exists(&self, name: &str, card_num: u32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM patrons WHERE name = $1 AND card_num = $2)",
        )
        .bind(name)
        .bind(i64::from(card_num))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
