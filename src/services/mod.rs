//! Business logic services

pub mod catalog;
pub mod loans;
pub mod sessions;

use crate::{config::SessionConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub sessions: sessions::SessionService,
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, session_config: &SessionConfig) -> Self {
        Self {
            sessions: sessions::SessionService::new(repository.clone(), session_config),
            catalog: catalog::CatalogService::new(repository.clone()),
            loans: loans::LoansService::new(repository.clone()),
            repository,
        }
    }

    /// Check that the store answers
    pub async fn ping_store(&self) -> crate::error::AppResult<()> {
        self.repository.ping().await
    }
}
