use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    InputInvalid,
    InferenceUnavailable,
    InferenceRejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Failure at the inference boundary. Widget state is left as it was; the
/// page only shows the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    #[error("invalid input: {0}")]
    InputInvalid(String),
    #[error("inference service unavailable: {0}")]
    Unavailable(String),
    #[error("inference rejected the input: {0}")]
    Rejected(String),
}

impl InferenceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            InferenceError::InputInvalid(_) => ErrorCode::InputInvalid,
            InferenceError::Unavailable(_) => ErrorCode::InferenceUnavailable,
            InferenceError::Rejected(_) => ErrorCode::InferenceRejected,
        }
    }
}

impl From<InferenceError> for ApiError {
    fn from(value: InferenceError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}
