use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Board not found: {0}")]
    BoardNotFound(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Column title must not be empty")]
    EmptyColumnTitle,

    #[error("Card title must not be empty")]
    EmptyCardTitle,

    #[error("Invalid drop result: {0}")]
    InvalidDrop(String),

    #[error("Board not loaded")]
    BoardNotLoaded,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[cfg(feature = "http-source")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<toml::de::Error> for BoardError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError(err.to_string())
    }
}

impl BoardError {
    /// Whether the error came from talking to the source of record rather
    /// than from local validation.
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Api { .. } | Self::IoError(_) | Self::SerializationError(_) => true,
            #[cfg(feature = "http-source")]
            Self::Http(_) => true,
            _ => false,
        }
    }
}
