use thiserror::Error;

/// salonbook error types
#[derive(Error, Debug)]
pub enum SalonError {
    /// Failed to parse or serialize JSON
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for salonbook
pub type Result<T> = std::result::Result<T, SalonError>;
