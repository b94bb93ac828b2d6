use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Id;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDepotRequest {
    /// Depot name
    pub name: String,
    /// Postal address
    #[serde(default)]
    pub address: Option<String>,
    /// Person in charge on site
    #[serde(default)]
    pub contact_person: Option<String>,
    /// Contact phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Province the depot is located in
    #[serde(default)]
    pub province: Option<String>,
}

/// Full replacement of the mutable depot fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDepotRequest {
    /// New depot name
    pub name: String,
    /// New postal address
    #[serde(default)]
    pub address: Option<String>,
    /// New person in charge
    #[serde(default)]
    pub contact_person: Option<String>,
    /// New contact phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// New province
    #[serde(default)]
    pub province: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepotResponse {
    /// Depot identifier
    pub id: Id,
    /// Depot name
    pub name: String,
    /// Postal address
    pub address: Option<String>,
    /// Person in charge on site
    pub contact_person: Option<String>,
    /// Contact phone number
    pub phone: Option<String>,
    /// Province the depot is located in
    pub province: Option<String>,
    /// Installation time
    pub created_at: OffsetDateTime,
}
