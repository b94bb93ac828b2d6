use granary_api::DepotResponse;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Table;

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Depot {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub province: Option<String>,
    /// Installation time
    pub created_at: OffsetDateTime,
}

impl From<Depot> for DepotResponse {
    fn from(depot: Depot) -> Self {
        DepotResponse {
            id: depot.id,
            name: depot.name,
            address: depot.address,
            contact_person: depot.contact_person,
            phone: depot.phone,
            province: depot.province,
            created_at: depot.created_at,
        }
    }
}

#[derive(Clone)]
pub struct DepotTable;

impl Table for DepotTable {
    fn name(&self) -> &'static str {
        "depots"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS depots (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                address TEXT,
                contact_person TEXT,
                phone TEXT,
                province TEXT,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX IF NOT EXISTS depots_name_idx ON depots (name);
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS depots;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
