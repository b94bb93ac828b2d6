use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Manages depots, granaries and accounts
    Admin,
    /// Day to day depot staff
    #[default]
    Operator,
}

impl From<String> for UserRole {
    fn from(value: String) -> Self {
        match value.as_str() {
            "admin" => UserRole::Admin,
            _ => UserRole::Operator,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Operator => write!(f, "operator"),
        }
    }
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Unique login name
    pub username: String,
    /// Unique email address
    #[serde(default)]
    pub email: Option<String>,
    /// Display name
    #[serde(default)]
    pub full_name: Option<String>,
    /// Contact phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Account role
    #[serde(default)]
    pub role: UserRole,
    /// Depot the account belongs to
    #[serde(default)]
    pub depot_id: Option<Id>,
    /// Whether the account may be used
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Plain text password, hashed before storage
    pub password: String,
}

/// Full replacement of the profile fields; the password is left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub depot_id: Option<Id>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    /// User identifier
    pub id: Id,
    /// Unique login name
    pub username: String,
    /// Unique email address
    pub email: Option<String>,
    /// Display name
    pub full_name: Option<String>,
    /// Contact phone number
    pub phone: Option<String>,
    /// Account role
    pub role: UserRole,
    /// Depot the account belongs to
    pub depot_id: Option<Id>,
    /// Whether the account may be used
    pub is_active: bool,
}
