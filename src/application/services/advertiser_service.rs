//! Advertiser lifecycle service.

use std::sync::Arc;

use crate::domain::entities::{Advertiser, AdvertiserPatch, NewAdvertiser};
use crate::domain::repositories::AdvertiserRepository;
use crate::error::AppError;
use serde_json::json;

pub const UNKNOWN_ADVERTISER_ID: &str = "Unknown advertiserId Error";

/// Loads a live advertiser or fails with the unknown-id error.
///
/// Deleted advertisers are reported exactly like ids that never existed.
pub async fn require_advertiser(
    repository: &dyn AdvertiserRepository,
    id: i64,
) -> Result<Advertiser, AppError> {
    repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(UNKNOWN_ADVERTISER_ID, json!({ "advertiserId": id })))
}

/// Service for creating, reading, updating and deleting advertisers.
pub struct AdvertiserService {
    repository: Arc<dyn AdvertiserRepository>,
}

impl AdvertiserService {
    /// Creates a new advertiser service.
    pub fn new(repository: Arc<dyn AdvertiserRepository>) -> Self {
        Self { repository }
    }

    /// Creates an advertiser and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn add_advertiser(&self, new_advertiser: NewAdvertiser) -> Result<Advertiser, AppError> {
        let created = self.repository.create(new_advertiser).await?;
        tracing::info!(advertiser_id = created.id, "Advertiser created");
        Ok(created)
    }

    /// Returns a live advertiser.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] with the unknown-id message if the
    /// advertiser does not exist or was deleted.
    pub async fn get_advertiser(&self, id: i64) -> Result<Advertiser, AppError> {
        require_advertiser(self.repository.as_ref(), id).await
    }

    /// Applies a partial update.
    ///
    /// An empty patch only checks that the advertiser exists.
    pub async fn modify_advertiser(
        &self,
        id: i64,
        patch: AdvertiserPatch,
    ) -> Result<Advertiser, AppError> {
        if patch.is_empty() {
            return self.get_advertiser(id).await;
        }

        self.repository
            .update(id, patch)
            .await?
            .ok_or_else(|| AppError::not_found(UNKNOWN_ADVERTISER_ID, json!({ "advertiserId": id })))
    }

    /// Soft-deletes an advertiser.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the advertiser does not exist or was
    /// already deleted.
    pub async fn delete_advertiser(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.soft_delete(id).await? {
            return Err(AppError::not_found(
                UNKNOWN_ADVERTISER_ID,
                json!({ "advertiserId": id }),
            ));
        }

        tracing::info!(advertiser_id = id, "Advertiser deleted");
        Ok(())
    }

    /// Lists live advertisers.
    pub async fn list_advertisers(&self) -> Result<Vec<Advertiser>, AppError> {
        self.repository.list().await
    }

    /// Checks storage connectivity.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockAdvertiserRepository;
    use chrono::Utc;

    fn advertiser(id: i64, name: &str) -> Advertiser {
        Advertiser {
            id,
            name: name.to_string(),
            contact_name: None,
            email: None,
            comments: None,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[tokio::test]
    async fn test_add_advertiser() {
        let mut mock_repo = MockAdvertiserRepository::new();

        mock_repo
            .expect_create()
            .withf(|new| new.name == "Acme")
            .times(1)
            .returning(|new| Ok(advertiser(11, &new.name)));

        let service = AdvertiserService::new(Arc::new(mock_repo));

        let created = service
            .add_advertiser(NewAdvertiser {
                name: "Acme".to_string(),
                contact_name: None,
                email: None,
                comments: None,
            })
            .await
            .unwrap();

        assert_eq!(created.id, 11);
    }

    #[tokio::test]
    async fn test_get_unknown_advertiser() {
        let mut mock_repo = MockAdvertiserRepository::new();

        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = AdvertiserService::new(Arc::new(mock_repo));

        let err = service.get_advertiser(404).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.message(), UNKNOWN_ADVERTISER_ID);
    }

    #[tokio::test]
    async fn test_modify_with_empty_patch_only_checks_existence() {
        let mut mock_repo = MockAdvertiserRepository::new();

        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(advertiser(id, "Acme"))));
        mock_repo.expect_update().times(0);

        let service = AdvertiserService::new(Arc::new(mock_repo));

        let result = service.modify_advertiser(3, AdvertiserPatch::default()).await;
        assert_eq!(result.unwrap().id, 3);
    }

    #[tokio::test]
    async fn test_modify_unknown_advertiser() {
        let mut mock_repo = MockAdvertiserRepository::new();

        mock_repo
            .expect_update()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = AdvertiserService::new(Arc::new(mock_repo));

        let patch = AdvertiserPatch {
            name: Some("Renamed".to_string()),
            ..Default::default()
        };
        let err = service.modify_advertiser(9, patch).await.unwrap_err();
        assert_eq!(err.message(), UNKNOWN_ADVERTISER_ID);
    }

    #[tokio::test]
    async fn test_delete_twice_fails() {
        let mut mock_repo = MockAdvertiserRepository::new();

        let mut first = true;
        mock_repo.expect_soft_delete().times(2).returning(move |_| {
            let deleted = first;
            first = false;
            Ok(deleted)
        });

        let service = AdvertiserService::new(Arc::new(mock_repo));

        assert!(service.delete_advertiser(5).await.is_ok());
        let err = service.delete_advertiser(5).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
