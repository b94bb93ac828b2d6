use super::ErrorKind;

#[derive(Debug, thiserror::Error)]
pub enum DepotError {
    #[error("Depot {0} not found")]
    DepotNotFound(i32),

    #[error("Depot name must not be empty")]
    EmptyName,
}

impl DepotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DepotError::DepotNotFound(_) => ErrorKind::NotFound,
            DepotError::EmptyName => ErrorKind::InvalidRequest,
        }
    }
}
