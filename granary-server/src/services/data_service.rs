use std::sync::Arc;

use granary_api::{AppendDataRequest, DataRange, GranaryDataResponse};
use sqlx::types::Json;
use time::{OffsetDateTime, UtcOffset};

use crate::configs::{Pagination, Storage};
use crate::errors::service::on_constraint;
use crate::errors::{DataError, ServiceError};
use crate::models::GranaryData;
use crate::repositories::{GranaryDataRepository, GranaryRepository};
use crate::services::Caller;

/// Append-only sensor readings of a granary.
#[derive(Clone)]
pub struct GranaryDataService {
    storage: Arc<Storage>,
    pagination: Pagination,
    granary_repository: GranaryRepository,
    data_repository: GranaryDataRepository,
}

impl GranaryDataService {
    pub fn new(storage: Arc<Storage>, pagination: Pagination) -> Self {
        Self {
            granary_repository: GranaryRepository::new(storage.clone()),
            data_repository: GranaryDataRepository::new(storage.clone()),
            pagination,
            storage,
        }
    }

    pub async fn append_granary_data(
        &self,
        caller: &Caller,
        granary_id: i32,
        request: AppendDataRequest,
    ) -> Result<GranaryDataResponse, ServiceError> {
        if self.granary_repository.find_by_id(granary_id).await?.is_none() {
            return Err(DataError::InvalidGranary(granary_id).into());
        }

        let mut data = GranaryData {
            id: 0,
            granary_id,
            collected_at: to_utc(request.collected_at.unwrap_or_else(OffsetDateTime::now_utc)),
            sequence: request.sequence,
            temperatures: Json(request.temperatures),
            humidity: request.humidity,
        };

        let mut tx = self.storage.get_pool().begin().await?;
        data.id = self
            .data_repository
            .create(&data, &mut tx)
            .await
            .map_err(|e| {
                on_constraint(e, None, Some(DataError::InvalidGranary(granary_id).into()))
            })?;
        tx.commit().await?;

        tracing::info!(
            caller = %caller,
            granary_id,
            sequence = data.sequence,
            "granary data appended"
        );

        Ok(data.into())
    }

    /// Readings within the inclusive range, oldest first.
    pub async fn list_granary_data(
        &self,
        granary_id: i32,
        range: DataRange,
    ) -> Result<Vec<GranaryDataResponse>, ServiceError> {
        if range.is_inverted() {
            return Err(DataError::InvalidTimeRange.into());
        }
        self.ensure_granary(granary_id).await?;

        let data = self
            .data_repository
            .find_by_time_range(granary_id, range.start.map(to_utc), range.end.map(to_utc))
            .await?;

        tracing::debug!(granary_id, count = data.len(), "granary data listed");

        Ok(data.into_iter().map(Into::into).collect())
    }

    /// The newest readings, newest first.
    pub async fn latest_granary_data(
        &self,
        granary_id: i32,
        limit: u32,
    ) -> Result<Vec<GranaryDataResponse>, ServiceError> {
        self.ensure_granary(granary_id).await?;

        let limit = i64::from(limit.min(self.pagination.max_limit));
        let data = self.data_repository.find_latest(granary_id, limit).await?;

        Ok(data.into_iter().map(Into::into).collect())
    }

    async fn ensure_granary(&self, granary_id: i32) -> Result<(), ServiceError> {
        match self.granary_repository.find_by_id(granary_id).await? {
            Some(_) => Ok(()),
            None => Err(DataError::GranaryNotFound(granary_id).into()),
        }
    }
}

// Responses report readings in UTC, matching what is stored.
fn to_utc(at: OffsetDateTime) -> OffsetDateTime {
    at.to_offset(UtcOffset::UTC)
}
