//! Viewer identity and backend credentials.
//!
//! The signed-in viewer is handed to each operation that needs one instead of
//! living in global state.

use crate::errors::AppError;

/// Header name for the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// The signed-in user on whose behalf operations run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub id: String,
    pub display_name: Option<String>,
}

impl Viewer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// Unwrap the viewer or fail with an auth-required error.
pub fn require_viewer(viewer: Option<&Viewer>) -> Result<&Viewer, AppError> {
    match viewer {
        Some(v) if !v.id.trim().is_empty() => Ok(v),
        _ => Err(AppError::auth_required()),
    }
}
