use std::collections::BTreeMap;

use granary_api::GranaryDataResponse;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use super::Table;

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct GranaryData {
    pub id: i32,
    pub granary_id: i32,
    /// The time of the reading
    pub collected_at: OffsetDateTime,
    pub sequence: i32,
    /// Temperature in Celsius keyed by channel
    pub temperatures: Json<BTreeMap<String, f64>>,
    /// Relative humidity %
    pub humidity: Option<f64>,
}

/// Renders a reading time as fixed-width UTC text with nanosecond digits, so
/// stored values compare in time order as plain strings.
pub fn collected_at_key(at: OffsetDateTime) -> Result<String, sqlx::Error> {
    at.to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:9]Z"
        ))
        .map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

impl From<GranaryData> for GranaryDataResponse {
    fn from(data: GranaryData) -> Self {
        GranaryDataResponse {
            id: data.id,
            granary_id: data.granary_id,
            collected_at: data.collected_at,
            sequence: data.sequence,
            temperatures: data.temperatures.0,
            humidity: data.humidity,
        }
    }
}

#[derive(Clone)]
pub struct GranaryDataTable;

impl Table for GranaryDataTable {
    fn name(&self) -> &'static str {
        "granary_data"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS granary_data (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                granary_id INTEGER NOT NULL,
                collected_at TIMESTAMP NOT NULL,
                sequence INTEGER NOT NULL,
                temperatures JSON NOT NULL,
                humidity REAL,
                FOREIGN KEY (granary_id) REFERENCES granaries (id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS granary_data_time_idx ON granary_data (granary_id, collected_at);
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS granary_data;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["granaries"]
    }
}
