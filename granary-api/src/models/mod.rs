mod data;
mod depot;
mod granary;
mod user;

pub use data::*;
pub use depot::*;
pub use granary::*;
pub use user::*;

use serde::{Deserialize, Serialize};

pub type Id = i32;

/// Offset based paging shared by every list operation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Number of rows to skip
    #[serde(default)]
    pub skip: u32,
    /// Maximum number of rows to return, server default when absent
    #[serde(default)]
    pub limit: Option<u32>,
}

impl Pagination {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self {
            skip,
            limit: Some(limit),
        }
    }
}
