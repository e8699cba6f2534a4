//! Catalog repository: the title/copy/loan/borrower join

use sqlx::{FromRow, Pool, Postgres};

use super::to_u32;
use crate::{error::AppResult, models::CatalogRow};

/// Left join of the four tables. Copies sort by serial within a title and a
/// title without copies produces a single all-null tail.
const CATALOG_JOIN: &str = r#"
    SELECT t.isbn, t.title, t.author,
           i.serial,
           p.card_num AS holder_card,
           p.name AS holder_name
    FROM titles t
    LEFT JOIN inventory i ON i.isbn = t.isbn
    LEFT JOIN checked_out c ON c.serial = i.serial
    LEFT JOIN patrons p ON p.card_num = c.card_num
"#;

#[derive(Debug, FromRow)]
struct CatalogRecord {
    isbn: String,
    title: String,
    author: String,
    serial: Option<i64>,
    holder_card: Option<i64>,
    holder_name: Option<String>,
}

impl TryFrom<CatalogRecord> for CatalogRow {
    type Error = crate::error::AppError;

    fn try_from(record: CatalogRecord) -> AppResult<Self> {
        Ok(CatalogRow {
            isbn: record.isbn,
            title: record.title,
            author: record.author,
            serial: record.serial.map(|s| to_u32(s, "serial")).transpose()?,
            holder_card: record.holder_card.map(|c| to_u32(c, "card_num")).transpose()?,
            holder_name: record.holder_name,
        })
    }
}

#[derive(Clone)]
pub struct CatalogRepository {
    pool: Pool<Postgres>,
}

impl CatalogRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Every title with every copy and its current borrower, if any
    pub async fn all_rows(&self) -> AppResult<Vec<CatalogRow>> {
        let sql = format!("{} ORDER BY t.isbn, i.serial NULLS FIRST", CATALOG_JOIN);
        let records = sqlx::query_as::<_, CatalogRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Catalog join returned {} rows", records.len());
        records.into_iter().map(CatalogRow::try_from).collect()
    }

    /// Rows whose resolved borrower holds the given card
    pub async fn rows_for_card(&self, card_num: u32) -> AppResult<Vec<CatalogRow>> {
        let sql = format!(
            "{} WHERE p.card_num = $1 ORDER BY t.isbn, i.serial",
            CATALOG_JOIN
        );
        let records = sqlx::query_as::<_, CatalogRecord>(&sql)
            .bind(i64::from(card_num))
            .fetch_all(&self.pool)
            .await?;

        records.into_iter().map(CatalogRow::try_from).collect()
    }
}
