use super::ErrorKind;

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User {0} not found")]
    UserNotFound(i32),

    #[error("Username already registered")]
    UsernameExists,

    #[error("Email already registered")]
    EmailExists,

    #[error("Depot {0} referenced by user does not exist")]
    InvalidDepot(i32),

    #[error("Invalid request parameters")]
    InvalidRequest,
}

impl UserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::UserNotFound(_) => ErrorKind::NotFound,
            UserError::UsernameExists => ErrorKind::Conflict,
            UserError::EmailExists => ErrorKind::Conflict,
            UserError::InvalidDepot(_) => ErrorKind::InvalidReference,
            UserError::InvalidRequest => ErrorKind::InvalidRequest,
        }
    }
}
