// Error handling for quantized archives

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuantError>;

#[derive(Error, Debug)]
pub enum QuantError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Corrupt archive: {0}")]
    CorruptArchive(String),

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

impl QuantError {
    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        QuantError::CorruptArchive(msg.into())
    }

    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        QuantError::InvalidInput(msg.into())
    }
}
