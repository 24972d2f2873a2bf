use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{CalibrationStep, SessionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Configuration,
    Validation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

/// Failures raised by the step resolver and the deck checker.
///
/// Neither kind is transient: `Configuration` means the caller handed over a
/// session whose step is outside its type's sequence, `InvalidInput` means a
/// command parameter or deck snapshot was malformed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("step {step} is not part of the {session_type} step sequence")]
    Configuration {
        session_type: SessionType,
        step: CalibrationStep,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl CoreError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Configuration { .. } => ErrorCode::Configuration,
            CoreError::InvalidInput(_) => ErrorCode::Validation,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(value: CoreError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}
