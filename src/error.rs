use thiserror::Error;

/// Main error type for papergraph
#[derive(Error, Debug)]
pub enum PapergraphError {
    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level HTTP failures (timeouts, connection resets, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A search or site-mapping provider rejected or failed a request
    #[error("Provider error: {0}")]
    Provider(String),

    /// Parse errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Relationship extractor (LLM) failures
    #[error("Analyzer error: {0}")]
    Analyzer(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenient Result type using PapergraphError
pub type Result<T> = std::result::Result<T, PapergraphError>;

impl From<serde_json::Error> for PapergraphError {
    fn from(err: serde_json::Error) -> Self {
        PapergraphError::Parse(err.to_string())
    }
}
