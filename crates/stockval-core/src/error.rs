use thiserror::Error;

#[derive(Debug, Error)]
pub enum StockvalError {
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid configuration for {field}: {reason}")]
    InvalidConfiguration { field: String, reason: String },

    #[error("Lookup miss: {0}")]
    LookupMiss(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for StockvalError {
    fn from(e: serde_json::Error) -> Self {
        StockvalError::SerializationError(e.to_string())
    }
}
