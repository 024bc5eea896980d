//! Unified API error handling
//!
//! Every failed analysis is rendered as the `{success: false, error}`
//! envelope with a status code matching the failure class.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use uuid::Uuid;

use crate::service::analysis::AnalysisError;

/// Failure envelope returned to the caller
#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    success: bool,
    error: String,
}

/// Unified API error type
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Precondition failure in the inbound request (400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream transport/auth/quota failure (502)
    #[error("Reasoning service error: {0}")]
    ReasoningService(String),

    /// Upstream returned no usable content (502)
    #[error("Reasoning service returned no response content")]
    EmptyResponse,

    /// Upstream output was not parseable as JSON (502)
    #[error("Failed to parse response as JSON: {0}")]
    MalformedResponse(String),

    /// Upstream output did not match the report contract (502)
    #[error("Response failed schema validation: {0}")]
    SchemaViolation(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ReasoningService(_)
            | ApiError::EmptyResponse
            | ApiError::MalformedResponse(_)
            | ApiError::SchemaViolation(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = match self {
            ApiError::InvalidRequest(_) => "invalid_request",
            ApiError::ReasoningService(_) => "reasoning_service_error",
            ApiError::EmptyResponse => "empty_response",
            ApiError::MalformedResponse(_) => "malformed_response",
            ApiError::SchemaViolation(_) => "schema_violation",
        };

        tracing::error!(
            error_type = error_type,
            status = status.as_u16(),
            request_id = %Uuid::new_v4(),
            message = %self,
            "API error"
        );

        HttpResponse::build(status).json(ErrorEnvelope {
            success: false,
            error: self.to_string(),
        })
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InvalidRequest(message) => ApiError::InvalidRequest(message),
            AnalysisError::ServiceError(message) => ApiError::ReasoningService(message),
            AnalysisError::EmptyResponse => ApiError::EmptyResponse,
            AnalysisError::MalformedResponse(message) => ApiError::MalformedResponse(message),
            AnalysisError::SchemaViolation { field, reason } => {
                ApiError::SchemaViolation(format!("{field}: {reason}"))
            }
        }
    }
}
