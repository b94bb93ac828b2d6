mod auth_service;
mod caller;
mod config_service;
mod data_service;
mod depot_service;
mod granary_service;
mod info_service;
mod user_service;

pub use auth_service::*;
pub use caller::*;
pub use config_service::*;
pub use data_service::*;
pub use depot_service::*;
pub use granary_service::*;
pub use info_service::*;
pub use user_service::*;
