use super::ErrorKind;

#[derive(Debug, thiserror::Error)]
pub enum GranaryError {
    #[error("Granary {0} not found")]
    GranaryNotFound(i32),

    #[error("Depot {0} referenced by granary does not exist")]
    InvalidDepot(i32),

    #[error("Granary name must not be empty")]
    EmptyName,

    #[error("Granary {0} has no config")]
    ConfigNotFound(i32),

    #[error("Granary {0} already has a config")]
    ConfigExists(i32),

    #[error("Granary {0} has no info")]
    InfoNotFound(i32),

    #[error("Granary {0} already has info")]
    InfoExists(i32),
}

impl GranaryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GranaryError::GranaryNotFound(_) => ErrorKind::NotFound,
            GranaryError::InvalidDepot(_) => ErrorKind::InvalidReference,
            GranaryError::EmptyName => ErrorKind::InvalidRequest,
            GranaryError::ConfigNotFound(_) => ErrorKind::NotFound,
            GranaryError::ConfigExists(_) => ErrorKind::Conflict,
            GranaryError::InfoNotFound(_) => ErrorKind::NotFound,
            GranaryError::InfoExists(_) => ErrorKind::Conflict,
        }
    }
}
