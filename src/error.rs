use thiserror::Error;

use crate::graph::RouteError;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Malformed model response: {0}")]
    ResponseError(String),

    #[error("Thread store error: {0}")]
    StoreError(String),

    #[error("Unknown route: {0}")]
    UnknownRoute(#[from] RouteError),

    #[error("Turn aborted after {0} assistant invocations without a final reply")]
    StepLimit(usize),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for AssistantError {
    fn from(err: anyhow::Error) -> Self {
        AssistantError::Other(format!("{:#}", err))
    }
}

impl From<String> for AssistantError {
    fn from(msg: String) -> Self {
        AssistantError::Other(msg)
    }
}

impl From<&str> for AssistantError {
    fn from(msg: &str) -> Self {
        AssistantError::Other(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AssistantError>;
