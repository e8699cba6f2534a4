//! Data models for the library server

pub mod catalog;
pub mod patron;
pub mod session;

// Re-export commonly used types
pub use catalog::{CatalogRow, CheckedOut, InventoryItem, MyBook, Title, TitleListing};
pub use patron::Patron;
pub use session::Session;
