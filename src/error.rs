//! Error types and handling for the climate API

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the climate API
#[derive(Error, Debug)]
pub enum ClimateApiError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Request parameter validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The observation table holds no rows, so there is no most recent date
    #[error("No observations available")]
    NoData,

    /// Data store errors (SQLite failures, missing tables, unreadable rows)
    #[error("Store error: {message}")]
    Store { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl ClimateApiError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// HTTP status this error is reported with
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            ClimateApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ClimateApiError::NoData => StatusCode::NOT_FOUND,
            ClimateApiError::Config { .. }
            | ClimateApiError::Store { .. }
            | ClimateApiError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ClimateApiError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            ClimateApiError::Validation { message } => format!("Invalid input: {message}"),
            ClimateApiError::NoData => "The dataset contains no observations.".to_string(),
            ClimateApiError::Store { .. } => "Internal server error.".to_string(),
            ClimateApiError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<rusqlite::Error> for ClimateApiError {
    fn from(err: rusqlite::Error) -> Self {
        Self::store(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ClimateApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::store(format!("query task failed: {err}"))
    }
}

impl IntoResponse for ClimateApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }
        (status, Json(json!({ "error": self.user_message() }))).into_response()
    }
}
