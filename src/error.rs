//! Error types and handling for the `TripPlanner` service

use thiserror::Error;

/// Main error type for the `TripPlanner` service
#[derive(Error, Debug)]
pub enum TripPlannerError {
    /// Configuration-related errors (missing API key, bad config file)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream API communication errors (model endpoint, image search)
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Cache operation errors
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl TripPlannerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripPlannerError::Config { message } => message.clone(),
            TripPlannerError::Api { .. } => {
                "Could not reach the itinerary service. Please try again shortly.".to_string()
            }
            TripPlannerError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TripPlannerError::Cache { .. } => {
                "Cache operation failed. You may need to clear your cache.".to_string()
            }
            TripPlannerError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            TripPlannerError::General { message } => message.clone(),
        }
    }
}

impl From<reqwest::Error> for TripPlannerError {
    fn from(err: reqwest::Error) -> Self {
        TripPlannerError::api(err.to_string())
    }
}
