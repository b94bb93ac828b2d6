use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Id;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppendDataRequest {
    /// Collection time, defaults to the moment of insertion
    #[serde(default)]
    pub collected_at: Option<OffsetDateTime>,
    /// Collection sequence number
    pub sequence: i32,
    /// Temperature readings keyed by channel
    #[serde(default)]
    pub temperatures: BTreeMap<String, f64>,
    /// Relative humidity percentage
    #[serde(default)]
    pub humidity: Option<f64>,
}

/// Inclusive time window, either bound may be open.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataRange {
    #[serde(default)]
    pub start: Option<OffsetDateTime>,
    #[serde(default)]
    pub end: Option<OffsetDateTime>,
}

impl DataRange {
    pub fn between(start: OffsetDateTime, end: OffsetDateTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start > end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GranaryDataResponse {
    /// Record identifier
    pub id: Id,
    /// Owning granary identifier
    pub granary_id: Id,
    /// Collection time
    pub collected_at: OffsetDateTime,
    /// Collection sequence number
    pub sequence: i32,
    /// Temperature readings keyed by channel
    pub temperatures: BTreeMap<String, f64>,
    /// Relative humidity percentage
    pub humidity: Option<f64>,
}
