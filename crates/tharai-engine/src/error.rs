//! Error types for tharai-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TharaiError {
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid chart: {0}")]
    InvalidChart(String),

    #[error("Invalid almanac: {0}")]
    InvalidAlmanac(String),
}

pub type Result<T> = std::result::Result<T, TharaiError>;
