use super::{DataError, DepotError, ErrorKind, GranaryError, UserError};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Depot error: {0}")]
    DepotError(#[from] DepotError),

    #[error("Granary error: {0}")]
    GranaryError(#[from] GranaryError),

    #[error("Data error: {0}")]
    DataError(#[from] DataError),

    #[error("User error: {0}")]
    UserError(#[from] UserError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::DepotError(e) => e.kind(),
            ServiceError::GranaryError(e) => e.kind(),
            ServiceError::DataError(e) => e.kind(),
            ServiceError::UserError(e) => e.kind(),
            ServiceError::DatabaseError(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                ErrorKind::Conflict
            }
            ServiceError::DatabaseError(sqlx::Error::Database(e))
                if e.is_foreign_key_violation() =>
            {
                ErrorKind::InvalidReference
            }
            ServiceError::DatabaseError(_) => ErrorKind::Internal,
            ServiceError::InternalError(_) => ErrorKind::Internal,
        }
    }
}

/// Replaces a constraint violation raised by the database with the domain
/// error that describes it. Anything without a replacement passes through.
pub(crate) fn on_constraint(
    error: sqlx::Error,
    unique: Option<ServiceError>,
    foreign_key: Option<ServiceError>,
) -> ServiceError {
    let (is_unique, is_foreign_key) = match &error {
        sqlx::Error::Database(e) => (e.is_unique_violation(), e.is_foreign_key_violation()),
        _ => (false, false),
    };

    match (is_unique, is_foreign_key) {
        (true, _) => unique.unwrap_or(ServiceError::DatabaseError(error)),
        (_, true) => foreign_key.unwrap_or(ServiceError::DatabaseError(error)),
        _ => ServiceError::DatabaseError(error),
    }
}
