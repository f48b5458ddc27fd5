use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScamSmartError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Generation Error: {0}")]
    Generation(String),

    #[error("Session Error: {0}")]
    Session(String),

    #[error("Store Error: {0}")]
    Store(String),
}

pub type SsResult<T> = Result<T, ScamSmartError>;
