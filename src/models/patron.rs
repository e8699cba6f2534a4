//! Patron (library member) model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A library member, identified by the exact pair of name and card number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Patron {
    pub name: String,
    pub card_num: u32,
}

impl Patron {
    pub fn new(name: impl Into<String>, card_num: u32) -> Self {
        Self {
            name: name.into(),
            card_num,
        }
    }

    /// Login identity check: both fields must match exactly
    pub fn matches(&self, name: &str, card_num: u32) -> bool {
        self.card_num == card_num && self.name == name
    }
}
