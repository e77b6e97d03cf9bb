//! Error types shared across the crate.

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid place record: {0}")]
    InvalidPlace(String),
    #[error("unknown place name: {0}")]
    UnknownPlace(String),
    #[error("invalid distance matrix: {0}")]
    InvalidMatrix(String),
    #[error("index {index} out of range for {dim} places")]
    IndexOutOfRange { index: usize, dim: usize },
    #[error("invalid tour: {0}")]
    InvalidTour(String),
}

pub type Result<T> = std::result::Result<T, Error>;
