//! In-memory backend
//!
//! Holds the four tables in process behind an async lock. Used for local
//! development (optionally loaded from a JSON seed file) and for tests that
//! exercise the circulation rules without a database server.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;

use super::LibraryStore;
use crate::{
    error::{AppError, AppResult},
    models::{CatalogRow, CheckedOut, InventoryItem, Patron, Title},
};

/// Table contents used to populate a [`MemoryStore`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub patrons: Vec<Patron>,
    #[serde(default)]
    pub titles: Vec<Title>,
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    #[serde(default)]
    pub checked_out: Vec<CheckedOut>,
}

impl Seed {
    pub fn patron(mut self, name: &str, card_num: u32) -> Self {
        self.patrons.push(Patron::new(name, card_num));
        self
    }

    pub fn title(mut self, isbn: &str, title: &str, author: &str) -> Self {
        self.titles.push(Title {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
        });
        self
    }

    pub fn copy(mut self, serial: u32, isbn: &str) -> Self {
        self.inventory.push(InventoryItem {
            serial,
            isbn: isbn.to_string(),
        });
        self
    }

    pub fn loan(mut self, serial: u32, card_num: u32) -> Self {
        self.checked_out.push(CheckedOut { serial, card_num });
        self
    }
}

#[derive(Debug, Default)]
struct Tables {
    patrons: Vec<Patron>,
    titles: Vec<Title>,
    inventory: Vec<InventoryItem>,
    checked_out: Vec<CheckedOut>,
}

impl Tables {
    /// Nested-loop left join; every unmatched side contributes one row of nulls
    fn join(&self) -> Vec<CatalogRow> {
        let mut titles: Vec<&Title> = self.titles.iter().collect();
        titles.sort_by(|a, b| a.isbn.cmp(&b.isbn));

        let mut rows = Vec::new();
        for title in titles {
            let mut copies: Vec<&InventoryItem> =
                self.inventory.iter().filter(|i| i.isbn == title.isbn).collect();
            copies.sort_by_key(|i| i.serial);

            if copies.is_empty() {
                rows.push(CatalogRow {
                    isbn: title.isbn.clone(),
                    title: title.title.clone(),
                    author: title.author.clone(),
                    serial: None,
                    holder_card: None,
                    holder_name: None,
                });
                continue;
            }

            for copy in copies {
                let holders: Vec<Option<&Patron>> = self
                    .checked_out
                    .iter()
                    .filter(|c| c.serial == copy.serial)
                    .flat_map(|loan| {
                        let matched: Vec<Option<&Patron>> = self
                            .patrons
                            .iter()
                            .filter(|p| p.card_num == loan.card_num)
                            .map(Some)
                            .collect();
                        if matched.is_empty() {
                            vec![None]
                        } else {
                            matched
                        }
                    })
                    .collect();

                let holders = if holders.is_empty() { vec![None] } else { holders };

                for holder in holders {
                    rows.push(CatalogRow {
                        isbn: title.isbn.clone(),
                        title: title.title.clone(),
                        author: title.author.clone(),
                        serial: Some(copy.serial),
                        holder_card: holder.map(|p| p.card_num),
                        holder_name: holder.map(|p| p.name.clone()),
                    });
                }
            }
        }

        rows
    }
}

/// Store holding every table in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: Seed) -> Self {
        Self {
            tables: RwLock::new(Tables {
                patrons: seed.patrons,
                titles: seed.titles,
                inventory: seed.inventory,
                checked_out: seed.checked_out,
            }),
        }
    }

    /// Load a JSON seed file shaped like [`Seed`]
    pub async fn from_seed_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::Internal(format!("Failed to read seed file {}: {}", path.display(), e))
        })?;
        let seed: Seed = serde_json::from_str(&content).map_err(|e| {
            AppError::Internal(format!("Invalid seed file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            "Loaded seed {}: {} patrons, {} titles, {} copies, {} loans",
            path.display(),
            seed.patrons.len(),
            seed.titles.len(),
            seed.inventory.len(),
            seed.checked_out.len()
        );

        Ok(Self::with_seed(seed))
    }
}

#[async_trait]
impl LibraryStore for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn patron_exists(&self, name: &str, card_num: u32) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.patrons.iter().any(|p| p.matches(name, card_num)))
    }

    async fn catalog_rows(&self) -> AppResult<Vec<CatalogRow>> {
        Ok(self.tables.read().await.join())
    }

    async fn rows_for_card(&self, card_num: u32) -> AppResult<Vec<CatalogRow>> {
        let rows = self.tables.read().await.join();
        Ok(rows
            .into_iter()
            .filter(|row| row.holder_card == Some(card_num))
            .collect())
    }

    async fn copy_exists(&self, serial: u32) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.inventory.iter().any(|i| i.serial == serial))
    }

    async fn insert_loan(&self, loan: &CheckedOut) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.checked_out.iter().any(|c| c.serial == loan.serial) {
            return Ok(false);
        }
        tables.checked_out.push(loan.clone());
        Ok(true)
    }

    async fn delete_loans(&self, serial: u32, card_num: u32) -> AppResult<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.checked_out.len();
        tables
            .checked_out
            .retain(|c| !(c.serial == serial && c.card_num == card_num));
        Ok((before - tables.checked_out.len()) as u64)
    }
}
