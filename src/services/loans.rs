//! Check-out and return of copies for the logged-in patron

use crate::{
    error::{AppError, AppResult},
    models::{CheckedOut, Session},
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Lend a copy to the session's patron.
    ///
    /// A copy already on loan (to anyone) is refused, so a serial never has
    /// two active loans. The on-loan check and the insert are one store call.
    pub async fn check_out(&self, session: &Session, serial: u32) -> AppResult<()> {
        if !self.repository.copy_exists(serial).await? {
            return Err(AppError::NotFound(format!("Copy {} not found", serial)));
        }

        let inserted = self
            .repository
            .insert_loan(&CheckedOut {
                serial,
                card_num: session.card_num,
            })
            .await?;

        if !inserted {
            return Err(AppError::Conflict(format!(
                "Copy {} is already checked out",
                serial
            )));
        }

        tracing::info!("Copy {} checked out to card {}", serial, session.card_num);
        Ok(())
    }

    /// Return a copy held by the session's patron; nothing to return is not an error
    pub async fn return_book(&self, session: &Session, serial: u32) -> AppResult<()> {
        let removed = self
            .repository
            .delete_loans(serial, session.card_num)
            .await?;

        if removed == 0 {
            tracing::debug!(
                "Return of copy {} by card {} matched no loan",
                serial,
                session.card_num
            );
        } else {
            tracing::info!("Copy {} returned by card {}", serial, session.card_num);
        }
        Ok(())
    }
}
