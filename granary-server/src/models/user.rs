use granary_api::{UserResponse, UserRole};
use serde::{Deserialize, Serialize};

use super::Table;

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    /// `admin` or `operator`
    pub role: String,
    pub depot_id: Option<i32>,
    pub is_active: bool,
    /// Argon2 PHC string
    #[serde(skip_serializing)]
    pub password: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            role: UserRole::from(user.role),
            depot_id: user.depot_id,
            is_active: user.is_active,
        }
    }
}

#[derive(Clone)]
pub struct UserTable;

impl Table for UserTable {
    fn name(&self) -> &'static str {
        "users"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                email TEXT UNIQUE,
                full_name TEXT,
                phone TEXT,
                role TEXT NOT NULL DEFAULT 'operator',
                depot_id INTEGER,
                is_active BOOLEAN NOT NULL DEFAULT TRUE,
                password TEXT NOT NULL,
                FOREIGN KEY (depot_id) REFERENCES depots (id) ON DELETE SET NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS users;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["depots"]
    }
}
