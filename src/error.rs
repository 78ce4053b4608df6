//! Error types shared by the data and stats modules.

use polars::prelude::{DataType, PolarsError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FxError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to parse table: {0}")]
    Parse(#[from] PolarsError),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Column '{column}' is not numeric (dtype {dtype})")]
    NonNumericColumn { column: String, dtype: DataType },

    #[error("Column '{column}' row {row}: '{value}' is not a recognizable date")]
    DateParse {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Column '{0}' clashes with the generated year column")]
    ReservedColumn(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FxError>;
