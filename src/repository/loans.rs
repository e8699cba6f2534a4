//! Loans repository for database operations

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::CheckedOut};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Whether the serial names a copy in inventory
    pub async fn copy_exists(&self, serial: u32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM inventory WHERE serial = $1)")
                .bind(i64::from(serial))
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Record a new loan unless the copy is already out; false when nothing was inserted
    pub async fn create(&self, loan: &CheckedOut) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO checked_out (serial, card_num)
            SELECT $1, $2
            WHERE NOT EXISTS (SELECT 1 FROM checked_out WHERE serial = $1)
            "#,
        )
        .bind(i64::from(loan.serial))
        .bind(i64::from(loan.card_num))
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Remove every loan of the copy held by the card
    pub async fn delete(&self, serial: u32, card_num: u32) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM checked_out WHERE serial = $1 AND card_num = $2")
            .bind(i64::from(serial))
            .bind(i64::from(card_num))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
