//! Library circulation server
//!
//! A REST JSON API over a small library catalog: patrons log in with their
//! name and card number, browse titles and copies, and check copies out and
//! back in.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig, repository: repository::Repository) -> Self {
        let services = services::Services::new(repository, &config.sessions);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
