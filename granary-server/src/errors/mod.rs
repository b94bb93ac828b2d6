pub mod data;
pub mod depot;
pub mod granary;
pub mod service;
pub mod user;

pub use data::DataError;
pub use depot::DepotError;
pub use granary::GranaryError;
pub use service::ServiceError;
pub use user::UserError;

/// Coarse classification surfaced to the request layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The identity does not resolve to an existing row
    NotFound,
    /// A foreign key in the request does not resolve
    InvalidReference,
    /// A uniqueness rule would be violated
    Conflict,
    /// A required field is missing or malformed
    InvalidRequest,
    Internal,
}
