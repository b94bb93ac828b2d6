use std::sync::Arc;

use granary_api::{GranaryConfigPatch, GranaryConfigResponse};

use crate::configs::Storage;
use crate::errors::service::on_constraint;
use crate::errors::{GranaryError, ServiceError};
use crate::models::{Granary, GranaryConfig};
use crate::repositories::{GranaryConfigRepository, GranaryRepository};
use crate::services::Caller;

/// Direct access to the collection config of a single granary.
#[derive(Clone)]
pub struct GranaryConfigService {
    storage: Arc<Storage>,
    granary_repository: GranaryRepository,
    config_repository: GranaryConfigRepository,
}

impl GranaryConfigService {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self {
            granary_repository: GranaryRepository::new(storage.clone()),
            config_repository: GranaryConfigRepository::new(storage.clone()),
            storage,
        }
    }

    pub async fn get_granary_config(
        &self,
        granary_id: i32,
    ) -> Result<GranaryConfigResponse, ServiceError> {
        self.find_granary(granary_id).await?;
        let config = self.find_config(granary_id).await?;

        Ok(config.into())
    }

    /// Creates the config of a granary that has none yet.
    pub async fn attach_granary_config(
        &self,
        caller: &Caller,
        granary_id: i32,
        patch: GranaryConfigPatch,
    ) -> Result<GranaryConfigResponse, ServiceError> {
        self.find_granary(granary_id).await?;
        if self.config_repository.find_by_granary_id(granary_id).await?.is_some() {
            return Err(GranaryError::ConfigExists(granary_id).into());
        }

        let config = GranaryConfig::from_patch(granary_id, patch);

        let mut tx = self.storage.get_pool().begin().await?;
        self.config_repository
            .create(&config, &mut tx)
            .await
            .map_err(|e| {
                on_constraint(
                    e,
                    Some(GranaryError::ConfigExists(granary_id).into()),
                    Some(GranaryError::GranaryNotFound(granary_id).into()),
                )
            })?;
        tx.commit().await?;

        tracing::info!(caller = %caller, granary_id, "granary config attached");

        self.get_granary_config(granary_id).await
    }

    /// Overwrites only the fields the patch supplies.
    pub async fn merge_granary_config(
        &self,
        caller: &Caller,
        granary_id: i32,
        patch: GranaryConfigPatch,
    ) -> Result<GranaryConfigResponse, ServiceError> {
        self.find_granary(granary_id).await?;
        let mut config = self.find_config(granary_id).await?;
        config.merge(patch);

        let mut tx = self.storage.get_pool().begin().await?;
        self.config_repository.update(config.id, &config, &mut tx).await?;
        tx.commit().await?;

        tracing::info!(caller = %caller, granary_id, "granary config merged");

        self.get_granary_config(granary_id).await
    }

    async fn find_granary(&self, granary_id: i32) -> Result<Granary, ServiceError> {
        self.granary_repository
            .find_by_id(granary_id)
            .await?
            .ok_or_else(|| GranaryError::GranaryNotFound(granary_id).into())
    }

    async fn find_config(&self, granary_id: i32) -> Result<GranaryConfig, ServiceError> {
        self.config_repository
            .find_by_granary_id(granary_id)
            .await?
            .ok_or_else(|| GranaryError::ConfigNotFound(granary_id).into())
    }
}
