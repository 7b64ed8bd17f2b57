use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("invalid selector: {0}")]
    InvalidSelector(String),

    #[error("no such element: {0}")]
    NoSuchElement(String),

    #[error("session error: {0}")]
    Session(String),

    #[error("wire protocol error: {error}: {message}")]
    Wire { error: String, message: String },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("navigation failed: {0}")]
    Navigation(String),
}

pub type Result<T> = std::result::Result<T, DriverError>;
