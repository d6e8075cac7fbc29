// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types.
//!
//! Three families of failure reach the stores:
//! - the backend never answered (`Network`)
//! - the backend answered with a non-2xx status (`Api`)
//! - the input was rejected locally before any request was made
//!   (`Validation`, `InvalidTransition`)

use crate::models::RecurringRideStatus;

/// Fallback text when a failure carries no message of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Application error type shared by the transport, API clients and stores.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{detail}")]
    Api { status: u16, detail: String },

    #[error("{0}")]
    Validation(String),

    #[error("Cannot change recurring ride status from {from} to {to}")]
    InvalidTransition {
        from: RecurringRideStatus,
        to: RecurringRideStatus,
    },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// The backend could not be reached at all.
    pub fn is_network(&self) -> bool {
        matches!(self, AppError::Network(_))
    }

    /// The backend rejected our bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Api { status: 401, .. })
    }

    /// Backend status code, if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text suitable for showing to the user in an alert.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid value for {}", field),
                })
            })
            .collect();
        // field_errors() is backed by a HashMap
        messages.sort();
        AppError::Validation(messages.join("; "))
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_backend_detail_verbatim() {
        let err = AppError::Api {
            status: 400,
            detail: "Car not found".to_string(),
        };
        assert_eq!(err.to_string(), "Car not found");
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_network());
    }

    #[test]
    fn test_unauthorized_only_matches_401() {
        let err = AppError::Api {
            status: 401,
            detail: "Could not validate credentials".to_string(),
        };
        assert!(err.is_unauthorized());

        let err = AppError::Api {
            status: 403,
            detail: "Forbidden".to_string(),
        };
        assert!(!err.is_unauthorized());
        assert!(!AppError::Network("refused".to_string()).is_unauthorized());
    }

    #[test]
    fn test_user_message_falls_back_when_empty() {
        let err = AppError::Api {
            status: 500,
            detail: "  ".to_string(),
        };
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }
}
