//! Error type shared by the loaders and the arrears engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArrearsError {
    /// A year inside the analysis range has no minimum wage / adjustment / IPC row
    #[error("missing reference data for year {year}")]
    MissingReferenceData { year: i32 },

    #[error("invalid reference row: {0}")]
    InvalidReferenceRow(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArrearsError>;
