//! Error handling module for the Lente client core.
//!
//! Provides the client error type with mapping from backend error envelopes and
//! user-facing messages.

use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const BACKEND_ERROR: &str = "BACKEND_ERROR";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

/// Generic text shown when a backend call fails.
const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Client error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Viewer missing or API key rejected
    Unauthorized(String),
    /// Resource not found
    NotFound(String),
    /// Input rejected before (or by) the backend
    Validation(String),
    /// Transport failure, the request never produced a response
    Network(String),
    /// Backend answered with a failure status
    Backend { status: u16, message: String },
    /// Response body could not be decoded
    Decode(String),
    /// Invalid client configuration
    Config(String),
}

impl AppError {
    /// Error raised when an operation needs a signed-in viewer.
    pub fn auth_required() -> Self {
        AppError::Unauthorized("You need to sign in to do that".to_string())
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => codes::UNAUTHORIZED,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::Network(_) => codes::NETWORK_ERROR,
            AppError::Backend { .. } => codes::BACKEND_ERROR,
            AppError::Decode(_) => codes::DECODE_ERROR,
            AppError::Config(_) => codes::CONFIG_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Network(msg) => msg.clone(),
            AppError::Backend { message, .. } => message.clone(),
            AppError::Decode(msg) => msg.clone(),
            AppError::Config(msg) => msg.clone(),
        }
    }

    /// Message suitable for showing to the user.
    ///
    /// Validation and auth errors carry their own text; everything that went
    /// wrong on the wire collapses to a generic retry hint.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Unauthorized(msg) | AppError::Validation(msg) => msg.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }

    /// Whether the error was raised locally, before any backend call.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    /// Rebuild an error from a backend error envelope.
    pub fn from_response(status: u16, details: ErrorDetails) -> Self {
        match details.code.as_str() {
            codes::UNAUTHORIZED | "INVALID_PSK" => AppError::Unauthorized(details.message),
            codes::NOT_FOUND => AppError::NotFound(details.message),
            codes::VALIDATION_ERROR | codes::BAD_REQUEST => AppError::Validation(details.message),
            _ => AppError::Backend {
                status,
                message: details.message,
            },
        }
    }

    /// Error for a failure status whose body carried no envelope.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => AppError::Unauthorized(format!("Request rejected with status {}", status)),
            404 => AppError::NotFound(format!("Request failed with status {}", status)),
            _ => AppError::Backend {
                status,
                message: format!("Request failed with status {}", status),
            },
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("HTTP error: {:?}", err);
        if err.is_decode() {
            AppError::Decode(format!("Invalid response body: {}", err))
        } else {
            AppError::Network(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Decode(format!("JSON error: {}", err))
    }
}

/// Error details in the response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
                details: None,
            },
        }
    }
}
