mod depot;
mod granary;
mod granary_config;
mod granary_data;
mod granary_info;
mod user;

pub use depot::{Depot, DepotTable};
pub use granary::{Granary, GranaryTable};
pub use granary_config::{GranaryConfig, GranaryConfigTable};
pub use granary_data::{GranaryData, GranaryDataTable, collected_at_key};
pub use granary_info::{GranaryInfo, GranaryInfoTable};
pub use user::{User, UserTable};

pub trait Table {
    /// The name of the table
    fn name(&self) -> &'static str;

    /// The SQL statement to create the table
    fn create(&self) -> String;

    /// The SQL statement to dispose the table
    fn dispose(&self) -> String;

    /// The dependencies of the table
    fn dependencies(&self) -> Vec<&'static str>;
}
