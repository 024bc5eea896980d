//! Error taxonomy for the analysis pipeline
//!
//! Every kind is terminal for the current attempt; none triggers an
//! automatic retry. The caller decides whether to resubmit.

use thiserror::Error;

/// Error type for compliance analysis
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnalysisError {
    /// Precondition failure; no upstream call was made
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream transport/auth/quota failure, surfaced verbatim
    #[error("Reasoning service error: {0}")]
    ServiceError(String),

    /// The reasoning service returned no usable text content
    #[error("Reasoning service returned no response content")]
    EmptyResponse,

    /// The raw response text is not parseable as JSON
    #[error("Failed to parse response as JSON: {0}")]
    MalformedResponse(String),

    /// The parsed structure does not match the report contract
    #[error("Response field '{field}' violates the report schema: {reason}")]
    SchemaViolation { field: String, reason: String },
}
