use std::sync::Arc;

use crate::configs::{Pagination, SchemaManager, Settings, Storage};
use crate::services::{
    AuthService, DepotService, GranaryConfigService, GranaryDataService, GranaryInfoService,
    GranaryService, UserService,
};

/// Every service of the granary core, sharing one storage pool.
#[derive(Clone)]
pub struct App {
    pub storage: Arc<Storage>,
    pub depots: DepotService,
    pub granaries: GranaryService,
    pub configs: GranaryConfigService,
    pub infos: GranaryInfoService,
    pub data: GranaryDataService,
    pub users: UserService,
}

impl App {
    pub fn new(storage: Arc<Storage>, pagination: Pagination) -> Self {
        let granaries = GranaryService::new(storage.clone(), pagination);

        Self {
            depots: DepotService::new(storage.clone(), pagination, granaries.clone()),
            configs: GranaryConfigService::new(storage.clone()),
            infos: GranaryInfoService::new(storage.clone()),
            data: GranaryDataService::new(storage.clone(), pagination),
            users: UserService::new(storage.clone(), pagination, AuthService::new()),
            granaries,
            storage,
        }
    }
}

pub async fn create_app(settings: &Arc<Settings>) -> Result<App, sqlx::Error> {
    let storage =
        Arc::new(Storage::new(settings.database.clone(), SchemaManager::default()).await?);

    Ok(App::new(storage, settings.pagination))
}
