use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Base URL cannot carry a path: {0}")]
    NotABase(String),

    #[error("API error [{status}]: {message}")]
    Api { status: u16, message: String },

    #[error("Network capabilities capped: {0}")]
    Sandbox(String),

    #[error("Unknown method id: {0}")]
    UnknownMethod(u32),

    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    #[error("Unknown preset id: {0}")]
    UnknownPreset(u32),
}

pub type Result<T> = std::result::Result<T, SolverError>;
