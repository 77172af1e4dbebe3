use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to open dataset '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("The dataset is missing the required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("Invalid field at line {line}: {reason}")]
    InvalidField { line: u64, reason: String },
}
