use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ZenError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),

    #[error("{0}")]
    Other(String),
}

impl ZenError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ZenError::Validation(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ZenError::Validation(_))
    }
}

impl From<serde_json::Error> for ZenError {
    fn from(e: serde_json::Error) -> Self {
        ZenError::Serialization(e.to_string())
    }
}
