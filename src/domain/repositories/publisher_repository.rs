//! Repository trait for publisher records.

use crate::domain::entities::{NewPublisher, Publisher};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for publishers.
///
/// Publishers are only read by the reports; creation exists for the admin
/// CLI and test fixtures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublisherRepository: Send + Sync {
    /// Registers a new publisher.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name is already taken.
    async fn create(&self, new_publisher: NewPublisher) -> Result<Publisher, AppError>;

    /// Lists all publishers ordered by id.
    async fn list(&self) -> Result<Vec<Publisher>, AppError>;
}
