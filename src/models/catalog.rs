//! Catalog and circulation models: titles, copies, loans and the joined views

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Catalog metadata for a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Title {
    pub isbn: String,
    pub title: String,
    pub author: String,
}

/// One circulating copy of a title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InventoryItem {
    pub serial: u32,
    pub isbn: String,
}

/// An active loan of a copy to a patron
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CheckedOut {
    pub serial: u32,
    pub card_num: u32,
}

/// One row of the left join titles -> inventory -> checked_out -> patrons.
///
/// `serial` is `None` for a title without copies. `holder_card` and
/// `holder_name` are `None` for a copy that is not on loan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub serial: Option<u32>,
    pub holder_card: Option<u32>,
    pub holder_name: Option<String>,
}

/// Entry of the full catalog listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TitleListing {
    pub isbn: String,
    pub title: String,
    pub author: String,
    /// Copy serial, null when the title is not stocked
    pub serial: Option<u32>,
    /// Borrower name, empty when the copy is on the shelf
    pub name: String,
}

impl From<CatalogRow> for TitleListing {
    fn from(row: CatalogRow) -> Self {
        Self {
            isbn: row.isbn,
            title: row.title,
            author: row.author,
            serial: row.serial,
            name: row.holder_name.unwrap_or_default(),
        }
    }
}

/// A book currently checked out by the logged-in patron
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MyBook {
    pub title: String,
    pub author: String,
    pub serial: u32,
}

impl MyBook {
    /// Keep only fully resolved rows held by `card_num`
    pub fn from_row(row: CatalogRow, card_num: u32) -> Option<Self> {
        match (row.serial, row.holder_card) {
            (Some(serial), Some(holder)) if holder == card_num => Some(Self {
                title: row.title,
                author: row.author,
                serial,
            }),
            _ => None,
        }
    }
}
