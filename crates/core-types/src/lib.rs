pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::DashboardTab;
pub use error::CoreError;
pub use structs::{end_of_day, start_of_day, DateRange, OrderRecord};
