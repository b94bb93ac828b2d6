use granary_api::{CollectionStatus, GranaryConfigResponse, GranaryInfoResponse, GranaryResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Table;

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Granary {
    pub id: i32,
    pub depot_id: i32,
    pub name: String,
    /// Completion time of the most recent collection
    pub last_collected_at: Option<OffsetDateTime>,
    /// `idle` or `collecting`
    pub collection_status: String,
}

impl Granary {
    pub fn into_response(
        self,
        config: Option<GranaryConfigResponse>,
        info: Option<GranaryInfoResponse>,
    ) -> GranaryResponse {
        GranaryResponse {
            id: self.id,
            depot_id: self.depot_id,
            name: self.name,
            last_collected_at: self.last_collected_at,
            collection_status: CollectionStatus::from(self.collection_status),
            config,
            info,
        }
    }
}

#[derive(Clone)]
pub struct GranaryTable;

impl Table for GranaryTable {
    fn name(&self) -> &'static str {
        "granaries"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS granaries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                depot_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                last_collected_at TIMESTAMP,
                collection_status TEXT NOT NULL DEFAULT 'idle',
                FOREIGN KEY (depot_id) REFERENCES depots (id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS granaries_depot_idx ON granaries (depot_id);
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS granaries;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["depots"]
    }
}
