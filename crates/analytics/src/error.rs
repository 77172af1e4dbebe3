use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Invalid filter range: {0}")]
    Range(#[from] CoreError),
}
