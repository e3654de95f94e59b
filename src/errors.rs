// ABOUTME: Unified error handling for the wellness intelligence engine
// ABOUTME: Standard error codes, AppError type, and convenience constructors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Wellness Hub

//! # Unified Error Handling
//!
//! Centralized error types for the engine. Absence of data is never an error
//! here: zero consumption, an empty catalog, and a missing catalog match are
//! all valid zero-value outcomes. Errors are reserved for genuine failures
//! (a store read failing, an invalid lifecycle transition) so that callers
//! can distinguish "zero data" from "failed to load data".

use crate::models::RecommendationStatus;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Input failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// A backing store read failed; the operation is retryable
    #[serde(rename = "DATA_UNAVAILABLE")]
    DataUnavailable,
    /// A recommendation lifecycle transition was invoked from an invalid state
    #[serde(rename = "INVALID_TRANSITION")]
    InvalidTransition,
    /// Requested resource does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound,
    /// Data serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError,
    /// Configuration error encountered
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError,
    /// An internal engine error occurred
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// Human-readable description for this error code
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::DataUnavailable => "A required data store is temporarily unavailable",
            Self::InvalidTransition => "Recommendation status transition is not allowed",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::SerializationError => "Data serialization/deserialization failed",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal engine error occurred",
        }
    }

    /// Whether a caller may retry the failed operation as-is
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::DataUnavailable)
    }
}

/// Unified error type for the engine
#[derive(Debug, Error)]
#[error("{}: {message}", .code.description())]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional key-value context
    pub details: serde_json::Value,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new error with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: serde_json::Value::Null,
            source: None,
        }
    }

    /// Attach structured details to the error
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    /// Attach a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// A store read failed; retryable
    pub fn data_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DataUnavailable, message)
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Invalid recommendation lifecycle transition, carrying the current and
    /// attempted status for the caller to surface or ignore
    #[must_use]
    pub fn invalid_transition(
        current: RecommendationStatus,
        attempted: RecommendationStatus,
    ) -> Self {
        Self::new(
            ErrorCode::InvalidTransition,
            format!("cannot transition recommendation from {current} to {attempted}"),
        )
        .with_details(serde_json::json!({
            "current_status": current,
            "attempted_status": attempted,
        }))
    }

    /// Internal engine error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, err.to_string()).with_source(err)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_carries_both_statuses() {
        let err = AppError::invalid_transition(
            RecommendationStatus::Pending,
            RecommendationStatus::Shopped,
        );
        assert_eq!(err.code, ErrorCode::InvalidTransition);
        assert_eq!(err.details["current_status"], "PENDING");
        assert_eq!(err.details["attempted_status"], "SHOPPED");
    }

    #[test]
    fn test_data_unavailable_is_retryable() {
        let err = AppError::data_unavailable("consumption log timed out");
        assert!(err.code.is_retryable());
        assert!(!AppError::internal("boom").code.is_retryable());
    }

    #[test]
    fn test_error_display_includes_code_description() {
        let err = AppError::invalid_input("empty user id");
        assert_eq!(
            err.to_string(),
            "The provided input is invalid: empty user id"
        );
    }
}
