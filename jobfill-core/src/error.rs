use jobfill_driver::DriverError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("driver error: {0}")]
    Driver(#[from] DriverError),

    #[error("invalid session state: expected {expected}, session is {actual}")]
    InvalidState {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("resume data error: {0}")]
    Resume(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
