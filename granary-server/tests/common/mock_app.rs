use std::sync::Arc;

use granary_api::UserRole;
use granary_server::app::App;
use granary_server::configs::{Database, Pagination, SchemaManager, Storage};
use granary_server::models::User;
use granary_server::services::Caller;
use granary_server::tests::create_test_user;

pub struct MockApp {
    pub app: App,
    pub storage: Arc<Storage>,
    pub admin: User,
    pub caller: Caller,
}

impl MockApp {
    pub async fn new() -> Self {
        Self::with_pagination(Pagination::default()).await
    }

    pub async fn with_pagination(pagination: Pagination) -> Self {
        let storage = Arc::new(
            Storage::new(
                Database {
                    migration_path: None,
                    clean_start: true,
                    url: String::from("sqlite::memory:"),
                },
                SchemaManager::default(),
            )
            .await
            .unwrap(),
        );

        let admin = create_test_user(storage.clone(), "admin", None).await;
        let caller = Caller::new(admin.id, UserRole::from(admin.role.clone()));
        let app = App::new(storage.clone(), pagination);

        Self {
            app,
            storage,
            admin,
            caller,
        }
    }

    pub async fn count(&self, table: &str) -> i64 {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(self.storage.get_pool())
            .await
            .unwrap();

        count
    }
}
