use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PharmacyError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid transition: cannot {action} while {from}")]
    InvalidTransition { from: String, action: String },

    #[error("Unsupported file: {0}")]
    UnsupportedFile(String),

    #[error("Cancelled")]
    Cancelled,

    #[error("JS interop error: {0}")]
    JsInterop(String),

    #[error("{0}")]
    Other(String),
}

impl PharmacyError {
    pub fn invalid_transition(from: impl Into<String>, action: impl Into<String>) -> Self {
        PharmacyError::InvalidTransition {
            from: from.into(),
            action: action.into(),
        }
    }
}

impl From<serde_json::Error> for PharmacyError {
    fn from(e: serde_json::Error) -> Self {
        PharmacyError::Serialization(e.to_string())
    }
}
