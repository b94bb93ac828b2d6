use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Id;
use crate::Patch;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionStatus {
    /// No collection in progress
    #[default]
    Idle,
    /// Collector hardware is currently sampling
    Collecting,
}

impl From<String> for CollectionStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "collecting" => CollectionStatus::Collecting,
            _ => CollectionStatus::Idle,
        }
    }
}

impl std::fmt::Display for CollectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CollectionStatus::Idle => write!(f, "idle"),
            CollectionStatus::Collecting => write!(f, "collecting"),
        }
    }
}

/// Collection hardware configuration, every field optional.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct GranaryConfigPatch {
    /// Extension (branch line) number of the collector bus
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub extension_number: Patch<i32>,
    /// Number of temperature collectors
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub temperature_collector_count: Patch<i32>,
    /// Number of temperature-humidity collectors
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub humiture_collector_count: Patch<i32>,
    /// Total collector count
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub total_collector_count: Patch<i32>,
    /// First collector index
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub start_index: Patch<i32>,
    /// Last collector index
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub end_index: Patch<i32>,
    /// Index of the temperature-humidity collector
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub th_index: Patch<i32>,
    /// Number of sensor cables
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub cable_count: Patch<i32>,
    /// Measuring points per cable
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub cable_point_count: Patch<i32>,
    /// Collection device number
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub device_number: Patch<i32>,
    /// Topic the device listens on
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub subscribe_topic: Patch<String>,
    /// Topic the device publishes readings to
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub publish_topic: Patch<String>,
}

/// Descriptive and inventory metadata, every field optional.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct GranaryInfoPatch {
    /// Keeper responsible for the granary
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub manager: Patch<String>,
    /// Design capacity in tons
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub design_capacity: Patch<f64>,
    /// Actual stored quantity in tons
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub actual_capacity: Patch<f64>,
    /// Storage nature, e.g. central or local reserve
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub storage_nature: Patch<String>,
    /// Grain variety
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub grain_variety: Patch<String>,
    /// Time the grain entered storage
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub entry_time: Patch<OffsetDateTime>,
    /// Place of origin
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub origin: Patch<String>,
    /// Quality grade
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub grade: Patch<String>,
    /// Rough rice yield ratio
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub rough_rice_yield: Patch<f64>,
    /// Moisture percentage
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub moisture: Patch<f64>,
    /// Free-text remark
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub remark: Patch<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGranaryRequest {
    /// Owning depot identifier
    pub depot_id: Id,
    /// Granary name
    pub name: String,
    /// Initial collection status
    #[serde(default)]
    pub collection_status: CollectionStatus,
    /// Embedded configuration
    #[serde(default)]
    pub config: Option<GranaryConfigPatch>,
    /// Embedded descriptive metadata
    #[serde(default)]
    pub info: Option<GranaryInfoPatch>,
}

/// Scalar fields are always replaced, satellites are merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateGranaryRequest {
    /// Owning depot identifier
    pub depot_id: Id,
    /// Granary name
    pub name: String,
    /// Configuration fields to merge or create
    #[serde(default)]
    pub config: Option<GranaryConfigPatch>,
    /// Metadata fields to merge or create
    #[serde(default)]
    pub info: Option<GranaryInfoPatch>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordCollectionRequest {
    /// New collection status
    pub status: CollectionStatus,
    /// Completion time stamped when returning to idle, defaults to now
    #[serde(default)]
    pub collected_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GranaryConfigResponse {
    pub id: Id,
    pub granary_id: Id,
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
    pub subscribe_topic: Option<String>,
    pub publish_topic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GranaryInfoResponse {
    pub id: Id,
    pub granary_id: Id,
    pub manager: Option<String>,
    pub design_capacity: Option<f64>,
    pub actual_capacity: Option<f64>,
    pub storage_nature: Option<String>,
    pub grain_variety: Option<String>,
    pub entry_time: Option<OffsetDateTime>,
    pub origin: Option<String>,
    pub grade: Option<String>,
    pub rough_rice_yield: Option<f64>,
    pub moisture: Option<f64>,
    pub remark: Option<String>,
}

/// A granary together with its satellites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GranaryResponse {
    /// Granary identifier
    pub id: Id,
    /// Owning depot identifier
    pub depot_id: Id,
    /// Granary name
    pub name: String,
    /// Last completed collection
    pub last_collected_at: Option<OffsetDateTime>,
    /// Current collection status
    pub collection_status: CollectionStatus,
    /// Collection configuration, if provisioned
    pub config: Option<GranaryConfigResponse>,
    /// Descriptive metadata, if provided
    pub info: Option<GranaryInfoResponse>,
}
