mod depot;
mod granary;
mod granary_config;
mod granary_data;
mod granary_info;
mod user;

pub use depot::DepotRepository;
pub use granary::GranaryRepository;
pub use granary_config::GranaryConfigRepository;
pub use granary_data::GranaryDataRepository;
pub use granary_info::GranaryInfoRepository;
pub use user::UserRepository;
