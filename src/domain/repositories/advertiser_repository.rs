//! Repository trait for advertiser data access.

use crate::domain::entities::{Advertiser, AdvertiserPatch, NewAdvertiser};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing advertisers.
///
/// Lookups only ever return live advertisers: a soft-deleted row behaves as
/// if it never existed.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAdvertiserRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdvertiserRepository: Send + Sync {
    /// Creates a new advertiser.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_advertiser: NewAdvertiser) -> Result<Advertiser, AppError>;

    /// Finds a live advertiser by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Advertiser))` if found and not deleted
    /// - `Ok(None)` otherwise
    async fn find_by_id(&self, id: i64) -> Result<Option<Advertiser>, AppError>;

    /// Lists live advertisers ordered by id.
    async fn list(&self) -> Result<Vec<Advertiser>, AppError>;

    /// Applies a partial update to a live advertiser.
    ///
    /// Returns `Ok(None)` if no live advertiser has this id.
    async fn update(&self, id: i64, patch: AdvertiserPatch)
    -> Result<Option<Advertiser>, AppError>;

    /// Soft-deletes an advertiser by setting `deleted_at = now()`.
    ///
    /// Returns `Ok(true)` if the advertiser was found and deleted, `Ok(false)`
    /// if not found or already deleted.
    async fn soft_delete(&self, id: i64) -> Result<bool, AppError>;

    /// Checks that the backing storage answers queries.
    async fn ping(&self) -> Result<(), AppError>;
}
