use granary_api::{GranaryInfoPatch, GranaryInfoResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Table;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GranaryInfo {
    pub id: i32,
    pub granary_id: i32,
    pub manager: Option<String>,
    /// Design capacity in tons
    pub design_capacity: Option<f64>,
    /// Actual stored quantity in tons
    pub actual_capacity: Option<f64>,
    pub storage_nature: Option<String>,
    pub grain_variety: Option<String>,
    pub entry_time: Option<OffsetDateTime>,
    pub origin: Option<String>,
    pub grade: Option<String>,
    pub rough_rice_yield: Option<f64>,
    /// Moisture percentage
    pub moisture: Option<f64>,
    pub remark: Option<String>,
}

impl GranaryInfo {
    /// Builds a new row from a payload. Yield and moisture are never stored
    /// as null on creation, they fall back to 0.0.
    pub fn from_patch(granary_id: i32, patch: GranaryInfoPatch) -> Self {
        Self {
            id: 0,
            granary_id,
            manager: patch.manager.into_value(),
            design_capacity: patch.design_capacity.into_value(),
            actual_capacity: patch.actual_capacity.into_value(),
            storage_nature: patch.storage_nature.into_value(),
            grain_variety: patch.grain_variety.into_value(),
            entry_time: patch.entry_time.into_value(),
            origin: patch.origin.into_value(),
            grade: patch.grade.into_value(),
            rough_rice_yield: Some(patch.rough_rice_yield.into_value().unwrap_or(0.0)),
            moisture: Some(patch.moisture.into_value().unwrap_or(0.0)),
            remark: patch.remark.into_value(),
        }
    }

    /// Overwrites only the fields the payload supplies, without normalization.
    pub fn merge(&mut self, patch: GranaryInfoPatch) {
        patch.manager.apply_to(&mut self.manager);
        patch.design_capacity.apply_to(&mut self.design_capacity);
        patch.actual_capacity.apply_to(&mut self.actual_capacity);
        patch.storage_nature.apply_to(&mut self.storage_nature);
        patch.grain_variety.apply_to(&mut self.grain_variety);
        patch.entry_time.apply_to(&mut self.entry_time);
        patch.origin.apply_to(&mut self.origin);
        patch.grade.apply_to(&mut self.grade);
        patch.rough_rice_yield.apply_to(&mut self.rough_rice_yield);
        patch.moisture.apply_to(&mut self.moisture);
        patch.remark.apply_to(&mut self.remark);
    }
}

impl From<GranaryInfo> for GranaryInfoResponse {
    fn from(info: GranaryInfo) -> Self {
        GranaryInfoResponse {
            id: info.id,
            granary_id: info.granary_id,
            manager: info.manager,
            design_capacity: info.design_capacity,
            actual_capacity: info.actual_capacity,
            storage_nature: info.storage_nature,
            grain_variety: info.grain_variety,
            entry_time: info.entry_time,
            origin: info.origin,
            grade: info.grade,
            rough_rice_yield: info.rough_rice_yield,
            moisture: info.moisture,
            remark: info.remark,
        }
    }
}

#[derive(Clone)]
pub struct GranaryInfoTable;

impl Table for GranaryInfoTable {
    fn name(&self) -> &'static str {
        "granary_infos"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS granary_infos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                granary_id INTEGER NOT NULL UNIQUE,
                manager TEXT,
                design_capacity REAL,
                actual_capacity REAL,
                storage_nature TEXT,
                grain_variety TEXT,
                entry_time TIMESTAMP,
                origin TEXT,
                grade TEXT,
                rough_rice_yield REAL,
                moisture REAL,
                remark TEXT,
                FOREIGN KEY (granary_id) REFERENCES granaries (id) ON DELETE CASCADE
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS granary_infos;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["granaries"]
    }
}
