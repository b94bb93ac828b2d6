use granary_api::{GranaryConfigPatch, GranaryConfigResponse};
use serde::{Deserialize, Serialize};

use super::Table;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GranaryConfig {
    pub id: i32,
    pub granary_id: i32,
    pub extension_number: Option<i32>,
    pub temperature_collector_count: Option<i32>,
    pub humiture_collector_count: Option<i32>,
    pub total_collector_count: Option<i32>,
    pub start_index: Option<i32>,
    pub end_index: Option<i32>,
    pub th_index: Option<i32>,
    pub cable_count: Option<i32>,
    pub cable_point_count: Option<i32>,
    pub device_number: Option<i32>,
    /// Topic the collection device listens on
    pub subscribe_topic: Option<String>,
    /// Topic the collection device publishes readings to
    pub publish_topic: Option<String>,
}

impl GranaryConfig {
    /// Builds a new row from a payload; omitted and null fields both stay null.
    pub fn from_patch(granary_id: i32, patch: GranaryConfigPatch) -> Self {
        Self {
            id: 0,
            granary_id,
            extension_number: patch.extension_number.into_value(),
            temperature_collector_count: patch.temperature_collector_count.into_value(),
            humiture_collector_count: patch.humiture_collector_count.into_value(),
            total_collector_count: patch.total_collector_count.into_value(),
            start_index: patch.start_index.into_value(),
            end_index: patch.end_index.into_value(),
            th_index: patch.th_index.into_value(),
            cable_count: patch.cable_count.into_value(),
            cable_point_count: patch.cable_point_count.into_value(),
            device_number: patch.device_number.into_value(),
            subscribe_topic: patch.subscribe_topic.into_value(),
            publish_topic: patch.publish_topic.into_value(),
        }
    }

    /// Overwrites only the fields the payload supplies.
    pub fn merge(&mut self, patch: GranaryConfigPatch) {
        patch.extension_number.apply_to(&mut self.extension_number);
        patch.temperature_collector_count.apply_to(&mut self.temperature_collector_count);
        patch.humiture_collector_count.apply_to(&mut self.humiture_collector_count);
        patch.total_collector_count.apply_to(&mut self.total_collector_count);
        patch.start_index.apply_to(&mut self.start_index);
        patch.end_index.apply_to(&mut self.end_index);
        patch.th_index.apply_to(&mut self.th_index);
        patch.cable_count.apply_to(&mut self.cable_count);
        patch.cable_point_count.apply_to(&mut self.cable_point_count);
        patch.device_number.apply_to(&mut self.device_number);
        patch.subscribe_topic.apply_to(&mut self.subscribe_topic);
        patch.publish_topic.apply_to(&mut self.publish_topic);
    }
}

impl From<GranaryConfig> for GranaryConfigResponse {
    fn from(config: GranaryConfig) -> Self {
        GranaryConfigResponse {
            id: config.id,
            granary_id: config.granary_id,
            extension_number: config.extension_number,
            temperature_collector_count: config.temperature_collector_count,
            humiture_collector_count: config.humiture_collector_count,
            total_collector_count: config.total_collector_count,
            start_index: config.start_index,
            end_index: config.end_index,
            th_index: config.th_index,
            cable_count: config.cable_count,
            cable_point_count: config.cable_point_count,
            device_number: config.device_number,
            subscribe_topic: config.subscribe_topic,
            publish_topic: config.publish_topic,
        }
    }
}

#[derive(Clone)]
pub struct GranaryConfigTable;

impl Table for GranaryConfigTable {
    fn name(&self) -> &'static str {
        "granary_configs"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS granary_configs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                granary_id INTEGER NOT NULL UNIQUE,
                extension_number INTEGER,
                temperature_collector_count INTEGER,
                humiture_collector_count INTEGER,
                total_collector_count INTEGER,
                start_index INTEGER,
                end_index INTEGER,
                th_index INTEGER,
                cable_count INTEGER,
                cable_point_count INTEGER,
                device_number INTEGER,
                subscribe_topic TEXT,
                publish_topic TEXT,
                FOREIGN KEY (granary_id) REFERENCES granaries (id) ON DELETE CASCADE
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS granary_configs;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["granaries"]
    }
}
