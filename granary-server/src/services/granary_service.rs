use std::collections::HashMap;
use std::sync::Arc;

use granary_api::{
    CollectionStatus, CreateGranaryRequest, GranaryResponse, Pagination as Page,
    RecordCollectionRequest, UpdateGranaryRequest,
};
use sqlx::{Sqlite, Transaction};
use time::OffsetDateTime;

use crate::configs::{Pagination, Storage};
use crate::errors::service::on_constraint;
use crate::errors::{GranaryError, ServiceError};
use crate::models::{Granary, GranaryConfig, GranaryInfo};
use crate::repositories::{
    DepotRepository, GranaryConfigRepository, GranaryInfoRepository, GranaryRepository,
};
use crate::services::Caller;

/// Reads and writes a granary together with its config and info satellites.
#[derive(Clone)]
pub struct GranaryService {
    storage: Arc<Storage>,
    pagination: Pagination,
    depot_repository: DepotRepository,
    granary_repository: GranaryRepository,
    config_repository: GranaryConfigRepository,
    info_repository: GranaryInfoRepository,
}

impl GranaryService {
    pub fn new(storage: Arc<Storage>, pagination: Pagination) -> Self {
        Self {
            depot_repository: DepotRepository::new(storage.clone()),
            granary_repository: GranaryRepository::new(storage.clone()),
            config_repository: GranaryConfigRepository::new(storage.clone()),
            info_repository: GranaryInfoRepository::new(storage.clone()),
            pagination,
            storage,
        }
    }

    pub async fn create_granary_aggregate(
        &self,
        caller: &Caller,
        request: CreateGranaryRequest,
    ) -> Result<GranaryResponse, ServiceError> {
        let name = validate_name(&request.name)?;
        self.ensure_depot(request.depot_id).await?;

        let granary = Granary {
            id: 0,
            depot_id: request.depot_id,
            name,
            last_collected_at: None,
            collection_status: request.collection_status.to_string(),
        };

        let mut tx = self.storage.get_pool().begin().await?;

        let id = self
            .granary_repository
            .create(&granary, &mut tx)
            .await
            .map_err(|e| {
                on_constraint(e, None, Some(GranaryError::InvalidDepot(granary.depot_id).into()))
            })?;

        if let Some(patch) = request.config {
            let config = GranaryConfig::from_patch(id, patch);
            self.config_repository
                .create(&config, &mut tx)
                .await
                .map_err(|e| satellite_error(e, id, GranaryError::ConfigExists))?;
        }

        if let Some(patch) = request.info {
            let info = GranaryInfo::from_patch(id, patch);
            self.info_repository
                .create(&info, &mut tx)
                .await
                .map_err(|e| satellite_error(e, id, GranaryError::InfoExists))?;
        }

        tx.commit().await?;

        tracing::info!(
            caller = %caller,
            granary_id = id,
            depot_id = granary.depot_id,
            "granary created"
        );

        self.get_granary_aggregate(id).await
    }

    pub async fn get_granary_aggregate(&self, id: i32) -> Result<GranaryResponse, ServiceError> {
        let mut tx = self.storage.get_pool().begin().await?;

        let granary = self
            .granary_repository
            .find_in_transaction(id, &mut tx)
            .await?
            .ok_or(GranaryError::GranaryNotFound(id))?;
        let mut aggregates = self.load_satellites(vec![granary], &mut tx).await?;

        tx.commit().await?;

        tracing::debug!(granary_id = id, "granary loaded");

        aggregates
            .pop()
            .ok_or_else(|| GranaryError::GranaryNotFound(id).into())
    }

    pub async fn list_granary_aggregates(
        &self,
        page: Page,
    ) -> Result<Vec<GranaryResponse>, ServiceError> {
        let (limit, offset) = self.pagination.resolve(page);

        let mut tx = self.storage.get_pool().begin().await?;
        let granaries = self
            .granary_repository
            .find_page(limit, offset, &mut tx)
            .await?;
        let aggregates = self.load_satellites(granaries, &mut tx).await?;
        tx.commit().await?;

        Ok(aggregates)
    }

    /// Aggregates of every granary in a depot, without checking the depot.
    pub(crate) async fn list_by_depot(
        &self,
        depot_id: i32,
    ) -> Result<Vec<GranaryResponse>, ServiceError> {
        let mut tx = self.storage.get_pool().begin().await?;
        let granaries = self
            .granary_repository
            .find_by_depot_id(depot_id, &mut tx)
            .await?;
        let aggregates = self.load_satellites(granaries, &mut tx).await?;
        tx.commit().await?;

        Ok(aggregates)
    }

    pub async fn update_granary_aggregate(
        &self,
        caller: &Caller,
        id: i32,
        request: UpdateGranaryRequest,
    ) -> Result<GranaryResponse, ServiceError> {
        let mut granary = self.find_granary(id).await?;
        granary.name = validate_name(&request.name)?;
        granary.depot_id = request.depot_id;
        self.ensure_depot(granary.depot_id).await?;

        let existing_config = self.config_repository.find_by_granary_id(id).await?;
        let existing_info = self.info_repository.find_by_granary_id(id).await?;

        let mut tx = self.storage.get_pool().begin().await?;

        self.granary_repository
            .update(id, &granary, &mut tx)
            .await
            .map_err(|e| {
                on_constraint(e, None, Some(GranaryError::InvalidDepot(granary.depot_id).into()))
            })?;

        if let Some(patch) = request.config {
            match existing_config {
                Some(mut config) => {
                    config.merge(patch);
                    self.config_repository
                        .update(config.id, &config, &mut tx)
                        .await?;
                }
                None => {
                    let config = GranaryConfig::from_patch(id, patch);
                    self.config_repository
                        .create(&config, &mut tx)
                        .await
                        .map_err(|e| satellite_error(e, id, GranaryError::ConfigExists))?;
                }
            }
        }

        if let Some(patch) = request.info {
            match existing_info {
                Some(mut info) => {
                    info.merge(patch);
                    self.info_repository.update(info.id, &info, &mut tx).await?;
                }
                None => {
                    let info = GranaryInfo::from_patch(id, patch);
                    self.info_repository
                        .create(&info, &mut tx)
                        .await
                        .map_err(|e| satellite_error(e, id, GranaryError::InfoExists))?;
                }
            }
        }

        tx.commit().await?;

        tracing::info!(caller = %caller, granary_id = id, "granary updated");

        self.get_granary_aggregate(id).await
    }

    pub async fn delete_granary_aggregate(
        &self,
        caller: &Caller,
        id: i32,
    ) -> Result<(), ServiceError> {
        self.find_granary(id).await?;

        let mut tx = self.storage.get_pool().begin().await?;
        self.granary_repository.delete(id, &mut tx).await?;
        tx.commit().await?;

        tracing::info!(caller = %caller, granary_id = id, "granary deleted");

        Ok(())
    }

    /// Reports collection progress. Returning to idle stamps the completion time.
    pub async fn record_collection(
        &self,
        caller: &Caller,
        id: i32,
        request: RecordCollectionRequest,
    ) -> Result<GranaryResponse, ServiceError> {
        self.find_granary(id).await?;

        let collected_at = match request.status {
            CollectionStatus::Idle => {
                Some(request.collected_at.unwrap_or_else(OffsetDateTime::now_utc))
            }
            CollectionStatus::Collecting => None,
        };

        let mut tx = self.storage.get_pool().begin().await?;
        self.granary_repository
            .update_collection(id, &request.status.to_string(), collected_at, &mut tx)
            .await?;
        tx.commit().await?;

        tracing::info!(
            caller = %caller,
            granary_id = id,
            status = %request.status,
            "collection status recorded"
        );

        self.get_granary_aggregate(id).await
    }

    // Satellites are read in the same transaction as their granaries.
    async fn load_satellites(
        &self,
        granaries: Vec<Granary>,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<GranaryResponse>, ServiceError> {
        let ids: Vec<i32> = granaries.iter().map(|g| g.id).collect();
        let configs = self
            .config_repository
            .find_by_granary_ids(&ids, transaction)
            .await?;
        let infos = self
            .info_repository
            .find_by_granary_ids(&ids, transaction)
            .await?;

        Ok(assemble(granaries, configs, infos))
    }

    async fn find_granary(&self, id: i32) -> Result<Granary, ServiceError> {
        self.granary_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| GranaryError::GranaryNotFound(id).into())
    }

    async fn ensure_depot(&self, depot_id: i32) -> Result<(), ServiceError> {
        match self.depot_repository.find_by_id(depot_id).await? {
            Some(_) => Ok(()),
            None => Err(GranaryError::InvalidDepot(depot_id).into()),
        }
    }
}

fn validate_name(name: &str) -> Result<String, ServiceError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GranaryError::EmptyName.into());
    }

    Ok(name.to_string())
}

fn satellite_error(
    error: sqlx::Error,
    granary_id: i32,
    exists: fn(i32) -> GranaryError,
) -> ServiceError {
    on_constraint(
        error,
        Some(exists(granary_id).into()),
        Some(GranaryError::GranaryNotFound(granary_id).into()),
    )
}

fn assemble(
    granaries: Vec<Granary>,
    configs: Vec<GranaryConfig>,
    infos: Vec<GranaryInfo>,
) -> Vec<GranaryResponse> {
    let mut configs: HashMap<i32, GranaryConfig> =
        configs.into_iter().map(|c| (c.granary_id, c)).collect();
    let mut infos: HashMap<i32, GranaryInfo> =
        infos.into_iter().map(|i| (i.granary_id, i)).collect();

    granaries
        .into_iter()
        .map(|granary| {
            let config = configs.remove(&granary.id).map(Into::into);
            let info = infos.remove(&granary.id).map(Into::into);
            granary.into_response(config, info)
        })
        .collect()
}
