use thiserror::Error;

#[derive(Debug, Error)]
pub enum TravelMatrixError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Cannot build a travel matrix without points")]
    EmptyInput,
}
