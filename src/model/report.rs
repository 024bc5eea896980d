//! Compliance report wire contract
//!
//! This is the structure the reasoning service must produce and the
//! validator enforces. Field names match the wire format exactly.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Severity of a single violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Account ban risk
    Critical,
    /// Ad disapproval risk
    Warning,
    /// Best practice recommendation
    Info,
}

/// Whether a violation was found in the copy or the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationCategory {
    Text,
    Image,
}

/// Coarse PASS/WARNING/FAIL classification associated with a score range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    Pass,
    Warning,
    Fail,
}

/// One discrete policy issue found in the text or image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Violation {
    pub severity: Severity,
    pub category: ViolationCategory,
    /// Exact offending excerpt, or an image-region description
    pub text_segment: String,
    /// Free-text policy citation
    pub policy_reference: String,
    /// Rationale for why this violates policy
    pub explanation: String,
    /// Suggested compliant rewrite or image fix
    pub suggestion: String,
}

/// Validated compliance report returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ComplianceReport {
    /// Compliance score, clamped to 0..=100
    pub score: u8,
    pub status: ComplianceStatus,
    /// Violations in discovery order
    pub violations: Vec<Violation>,
    pub overall_summary: String,
}
