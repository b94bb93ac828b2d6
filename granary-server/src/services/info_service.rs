use std::sync::Arc;

use granary_api::{GranaryInfoPatch, GranaryInfoResponse};

use crate::configs::Storage;
use crate::errors::service::on_constraint;
use crate::errors::{GranaryError, ServiceError};
use crate::models::{Granary, GranaryInfo};
use crate::repositories::{GranaryInfoRepository, GranaryRepository};
use crate::services::Caller;

/// Direct access to the descriptive info of a single granary.
#[derive(Clone)]
pub struct GranaryInfoService {
    storage: Arc<Storage>,
    granary_repository: GranaryRepository,
    info_repository: GranaryInfoRepository,
}

impl GranaryInfoService {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self {
            granary_repository: GranaryRepository::new(storage.clone()),
            info_repository: GranaryInfoRepository::new(storage.clone()),
            storage,
        }
    }

    pub async fn get_granary_info(
        &self,
        granary_id: i32,
    ) -> Result<GranaryInfoResponse, ServiceError> {
        self.find_granary(granary_id).await?;
        let info = self.find_info(granary_id).await?;

        Ok(info.into())
    }

    /// Creates the info of a granary that has none yet. Omitted yield and
    /// moisture are stored as 0.0.
    pub async fn attach_granary_info(
        &self,
        caller: &Caller,
        granary_id: i32,
        patch: GranaryInfoPatch,
    ) -> Result<GranaryInfoResponse, ServiceError> {
        self.find_granary(granary_id).await?;
        if self.info_repository.find_by_granary_id(granary_id).await?.is_some() {
            return Err(GranaryError::InfoExists(granary_id).into());
        }

        let info = GranaryInfo::from_patch(granary_id, patch);

        let mut tx = self.storage.get_pool().begin().await?;
        self.info_repository
            .create(&info, &mut tx)
            .await
            .map_err(|e| {
                on_constraint(
                    e,
                    Some(GranaryError::InfoExists(granary_id).into()),
                    Some(GranaryError::GranaryNotFound(granary_id).into()),
                )
            })?;
        tx.commit().await?;

        tracing::info!(caller = %caller, granary_id, "granary info attached");

        self.get_granary_info(granary_id).await
    }

    /// Overwrites only the fields the patch supplies. Nulls are kept as nulls.
    pub async fn merge_granary_info(
        &self,
        caller: &Caller,
        granary_id: i32,
        patch: GranaryInfoPatch,
    ) -> Result<GranaryInfoResponse, ServiceError> {
        self.find_granary(granary_id).await?;
        let mut info = self.find_info(granary_id).await?;
        info.merge(patch);

        let mut tx = self.storage.get_pool().begin().await?;
        self.info_repository.update(info.id, &info, &mut tx).await?;
        tx.commit().await?;

        tracing::info!(caller = %caller, granary_id, "granary info merged");

        self.get_granary_info(granary_id).await
    }

    async fn find_granary(&self, granary_id: i32) -> Result<Granary, ServiceError> {
        self.granary_repository
            .find_by_id(granary_id)
            .await?
            .ok_or_else(|| GranaryError::GranaryNotFound(granary_id).into())
    }

    async fn find_info(&self, granary_id: i32) -> Result<GranaryInfo, ServiceError> {
        self.info_repository
            .find_by_granary_id(granary_id)
            .await?
            .ok_or_else(|| GranaryError::InfoNotFound(granary_id).into())
    }
}

#[cfg(test)]
mod tests {
    use granary_api::Patch;

    use crate::errors::ErrorKind;
    use crate::tests::{create_test_depot, create_test_granary, setup_test_db};

    use super::*;

    #[tokio::test]
    async fn test_attach_normalizes_but_merge_does_not() {
        let storage = setup_test_db().await;
        let depot = create_test_depot(storage.clone(), "North").await;
        let granary = create_test_granary(storage.clone(), depot.id, "A").await;
        let service = GranaryInfoService::new(storage);
        let caller = Caller::system();

        let attached = service
            .attach_granary_info(
                &caller,
                granary.id,
                GranaryInfoPatch {
                    grain_variety: Patch::from("japonica".to_string()),
                    moisture: Patch::Present(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(attached.grain_variety.as_deref(), Some("japonica"));
        assert_eq!(attached.rough_rice_yield, Some(0.0));
        assert_eq!(attached.moisture, Some(0.0));

        let merged = service
            .merge_granary_info(
                &caller,
                granary.id,
                GranaryInfoPatch {
                    moisture: Patch::Present(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(merged.moisture, None);
        assert_eq!(merged.rough_rice_yield, Some(0.0));
        assert_eq!(merged.grain_variety.as_deref(), Some("japonica"));
    }

    #[tokio::test]
    async fn test_second_attach_conflicts() {
        let storage = setup_test_db().await;
        let depot = create_test_depot(storage.clone(), "North").await;
        let granary = create_test_granary(storage.clone(), depot.id, "A").await;
        let service = GranaryInfoService::new(storage);
        let caller = Caller::system();

        service
            .attach_granary_info(&caller, granary.id, GranaryInfoPatch::default())
            .await
            .unwrap();
        let error = service
            .attach_granary_info(&caller, granary.id, GranaryInfoPatch::default())
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert!(service.get_granary_info(granary.id + 1).await.is_err());
    }
}
