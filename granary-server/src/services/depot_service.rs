use std::sync::Arc;

use granary_api::{
    CreateDepotRequest, DepotResponse, GranaryResponse, Pagination as Page, UpdateDepotRequest,
};
use time::OffsetDateTime;

use crate::configs::{Pagination, Storage};
use crate::errors::{DepotError, ServiceError};
use crate::models::Depot;
use crate::repositories::DepotRepository;
use crate::services::{Caller, GranaryService};

#[derive(Clone)]
pub struct DepotService {
    storage: Arc<Storage>,
    pagination: Pagination,
    depot_repository: DepotRepository,
    granary_service: GranaryService,
}

impl DepotService {
    pub fn new(
        storage: Arc<Storage>,
        pagination: Pagination,
        granary_service: GranaryService,
    ) -> Self {
        Self {
            depot_repository: DepotRepository::new(storage.clone()),
            granary_service,
            pagination,
            storage,
        }
    }

    pub async fn create_depot(
        &self,
        caller: &Caller,
        request: CreateDepotRequest,
    ) -> Result<DepotResponse, ServiceError> {
        let depot = Depot {
            id: 0,
            name: validate_name(&request.name)?,
            address: request.address,
            contact_person: request.contact_person,
            phone: request.phone,
            province: request.province,
            created_at: OffsetDateTime::now_utc(),
        };

        let mut tx = self.storage.get_pool().begin().await?;
        let id = self.depot_repository.create(&depot, &mut tx).await?;
        tx.commit().await?;

        tracing::info!(caller = %caller, depot_id = id, "depot created");

        self.get_depot(id).await
    }

    pub async fn get_depot(&self, id: i32) -> Result<DepotResponse, ServiceError> {
        let depot = self.find_depot(id).await?;

        Ok(depot.into())
    }

    pub async fn list_depots(&self, page: Page) -> Result<Vec<DepotResponse>, ServiceError> {
        let (limit, offset) = self.pagination.resolve(page);
        let depots = self.depot_repository.find_page(limit, offset).await?;

        tracing::debug!(limit, offset, count = depots.len(), "depots listed");

        Ok(depots.into_iter().map(Into::into).collect())
    }

    pub async fn update_depot(
        &self,
        caller: &Caller,
        id: i32,
        request: UpdateDepotRequest,
    ) -> Result<DepotResponse, ServiceError> {
        let mut depot = self.find_depot(id).await?;
        depot.name = validate_name(&request.name)?;
        depot.address = request.address;
        depot.contact_person = request.contact_person;
        depot.phone = request.phone;
        depot.province = request.province;

        let mut tx = self.storage.get_pool().begin().await?;
        self.depot_repository.update(id, &depot, &mut tx).await?;
        tx.commit().await?;

        tracing::info!(caller = %caller, depot_id = id, "depot updated");

        self.get_depot(id).await
    }

    /// Removes the depot and, through cascading keys, every granary under it.
    pub async fn delete_depot(&self, caller: &Caller, id: i32) -> Result<(), ServiceError> {
        self.find_depot(id).await?;

        let mut tx = self.storage.get_pool().begin().await?;
        self.depot_repository.delete(id, &mut tx).await?;
        tx.commit().await?;

        tracing::info!(caller = %caller, depot_id = id, "depot deleted");

        Ok(())
    }

    pub async fn list_depot_granaries(
        &self,
        depot_id: i32,
    ) -> Result<Vec<GranaryResponse>, ServiceError> {
        self.find_depot(depot_id).await?;

        self.granary_service.list_by_depot(depot_id).await
    }

    async fn find_depot(&self, id: i32) -> Result<Depot, ServiceError> {
        self.depot_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DepotError::DepotNotFound(id).into())
    }
}

fn validate_name(name: &str) -> Result<String, ServiceError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DepotError::EmptyName.into());
    }

    Ok(name.to_string())
}
