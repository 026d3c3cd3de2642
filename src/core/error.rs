//! Errors raised while normalizing and converting Mimer tables

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MimerError {
    #[error("Failed to parse table: {0}")]
    Table(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Malformed value '{value}' in row {row}, column '{column}'")]
    MalformedRow {
        row: usize,
        column: String,
        value: String,
    },

    #[error("No exchange rate available for {0}")]
    MissingExchangeRate(NaiveDate),
}

pub type Result<T> = std::result::Result<T, MimerError>;
