use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Invalid configuration: {field} — {reason}")]
    InvalidConfiguration { field: String, reason: String },

    #[error("Candidate space too large: {estimated} combinations exceed the cap of {cap}; set allow_large_cardinality to enumerate anyway or switch to the sample strategy")]
    CardinalityExceeded { estimated: u128, cap: u128 },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ForecastError {
    fn from(e: serde_json::Error) -> Self {
        ForecastError::SerializationError(e.to_string())
    }
}
