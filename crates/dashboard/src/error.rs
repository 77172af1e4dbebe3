use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Invalid date range: {0}")]
    Range(#[from] CoreError),

    #[error("The dataset contains no approved orders, so there is no default date range")]
    NoApprovedOrders,
}
