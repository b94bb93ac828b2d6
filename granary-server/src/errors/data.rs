use super::ErrorKind;

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Granary {0} not found")]
    GranaryNotFound(i32),

    #[error("Granary {0} referenced by data record does not exist")]
    InvalidGranary(i32),

    #[error("Invalid time range")]
    InvalidTimeRange,
}

impl DataError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DataError::GranaryNotFound(_) => ErrorKind::NotFound,
            DataError::InvalidGranary(_) => ErrorKind::InvalidReference,
            DataError::InvalidTimeRange => ErrorKind::InvalidRequest,
        }
    }
}
