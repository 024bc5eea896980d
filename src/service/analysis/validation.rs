//! Validation of the reasoning service's raw output
//!
//! The upstream payload is untrusted input: shape or type mismatches are
//! rejected rather than coerced. The single documented numeric normalization
//! is clamping `score` into 0..=100 (rounding a fractional value to the
//! nearest integer). The upstream-provided `status` is accepted as-is when
//! it is a valid enum value; a status/score pairing that disagrees with the
//! documented thresholds is surfaced as a warning, never silently rewritten.

use serde_json::{Map, Value};

use crate::model::report::{
    ComplianceReport, ComplianceStatus, Severity, Violation, ViolationCategory,
};
use crate::policy::ScoreThresholds;
use crate::service::analysis::error::AnalysisError;

/// A validated report plus non-fatal quality warnings
#[derive(Debug)]
pub struct ValidatedReport {
    pub report: ComplianceReport,
    /// Quality issues that do not invalidate the report
    pub warnings: Vec<String>,
}

/// Status implied by a score under the documented thresholds
pub fn status_for_score(score: u8, thresholds: &ScoreThresholds) -> ComplianceStatus {
    if score >= thresholds.pass {
        ComplianceStatus::Pass
    } else if score >= thresholds.warning {
        ComplianceStatus::Warning
    } else {
        ComplianceStatus::Fail
    }
}

/// Parse and validate raw reasoning-service text into a compliance report
pub fn validate_report(
    raw: &str,
    thresholds: &ScoreThresholds,
) -> Result<ValidatedReport, AnalysisError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

    let object = value
        .as_object()
        .ok_or_else(|| schema("$", "expected a JSON object"))?;

    let score = parse_score(object)?;
    let status = parse_status(object)?;
    let violations = parse_violations(object)?;
    let overall_summary = required_string(object, "overall_summary")?;

    let mut warnings = Vec::new();

    let implied = status_for_score(score, thresholds);
    if status != implied {
        warnings.push(format!(
            "status '{status:?}' is inconsistent with score {score} (thresholds imply '{implied:?}')"
        ));
    }

    if overall_summary.trim().is_empty() {
        warnings.push("overall_summary is empty".to_string());
    }

    for (i, violation) in violations.iter().enumerate() {
        if violation.text_segment.trim().is_empty() {
            warnings.push(format!("violations[{i}].text_segment is empty"));
        }
    }

    Ok(ValidatedReport {
        report: ComplianceReport {
            score,
            status,
            violations,
            overall_summary,
        },
        warnings,
    })
}

fn schema(field: &str, reason: impl Into<String>) -> AnalysisError {
    AnalysisError::SchemaViolation {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn parse_score(object: &Map<String, Value>) -> Result<u8, AnalysisError> {
    let raw = object
        .get("score")
        .ok_or_else(|| schema("score", "missing required field"))?;
    let number = raw
        .as_f64()
        .ok_or_else(|| schema("score", "expected a number"))?;

    // Defensive normalization: out-of-range values are clamped, not rejected
    Ok(number.clamp(0.0, 100.0).round() as u8)
}

fn parse_status(object: &Map<String, Value>) -> Result<ComplianceStatus, AnalysisError> {
    let text = field_str(object, "status", "status")?;
    match text {
        "PASS" => Ok(ComplianceStatus::Pass),
        "WARNING" => Ok(ComplianceStatus::Warning),
        "FAIL" => Ok(ComplianceStatus::Fail),
        other => Err(schema(
            "status",
            format!("'{other}' is not one of PASS, WARNING, FAIL"),
        )),
    }
}

fn parse_violations(object: &Map<String, Value>) -> Result<Vec<Violation>, AnalysisError> {
    let raw = object
        .get("violations")
        .ok_or_else(|| schema("violations", "missing required field"))?;
    let items = raw
        .as_array()
        .ok_or_else(|| schema("violations", "expected an array"))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| parse_violation(i, item))
        .collect()
}

fn parse_violation(index: usize, value: &Value) -> Result<Violation, AnalysisError> {
    let path = |field: &str| format!("violations[{index}].{field}");

    let object = value
        .as_object()
        .ok_or_else(|| schema(&format!("violations[{index}]"), "expected an object"))?;

    let severity = match field_str(object, "severity", &path("severity"))? {
        "CRITICAL" => Severity::Critical,
        "WARNING" => Severity::Warning,
        "INFO" => Severity::Info,
        other => {
            return Err(schema(
                &path("severity"),
                format!("'{other}' is not one of CRITICAL, WARNING, INFO"),
            ));
        }
    };

    let category = match field_str(object, "category", &path("category"))? {
        "TEXT" => ViolationCategory::Text,
        "IMAGE" => ViolationCategory::Image,
        other => {
            return Err(schema(
                &path("category"),
                format!("'{other}' is not one of TEXT, IMAGE"),
            ));
        }
    };

    Ok(Violation {
        severity,
        category,
        text_segment: field_str(object, "text_segment", &path("text_segment"))?.to_string(),
        policy_reference: field_str(object, "policy_reference", &path("policy_reference"))?
            .to_string(),
        explanation: field_str(object, "explanation", &path("explanation"))?.to_string(),
        suggestion: field_str(object, "suggestion", &path("suggestion"))?.to_string(),
    })
}

fn required_string(object: &Map<String, Value>, key: &str) -> Result<String, AnalysisError> {
    Ok(field_str(object, key, key)?.to_string())
}

fn field_str<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a str, AnalysisError> {
    let raw = object
        .get(key)
        .ok_or_else(|| schema(path, "missing required field"))?;
    raw.as_str().ok_or_else(|| schema(path, "expected a string"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> ScoreThresholds {
        ScoreThresholds::default()
    }

    fn valid_raw(score: i64, status: &str) -> String {
        format!(
            r#"{{
                "score": {score},
                "status": "{status}",
                "violations": [
                    {{
                        "severity": "CRITICAL",
                        "category": "TEXT",
                        "text_segment": "Guaranteed",
                        "policy_reference": "Meta Policy 4.2: Personal Health",
                        "explanation": "Absolute result claims are prohibited",
                        "suggestion": "May support your weight goals"
                    }}
                ],
                "overall_summary": "One critical violation found in the copy."
            }}"#
        )
    }

    #[test]
    fn test_valid_report_parses_without_warnings() {
        let validated = validate_report(&valid_raw(75, "WARNING"), &thresholds()).unwrap();

        assert_eq!(validated.report.score, 75);
        assert_eq!(validated.report.status, ComplianceStatus::Warning);
        assert_eq!(validated.report.violations.len(), 1);
        assert_eq!(validated.report.violations[0].severity, Severity::Critical);
        assert_eq!(
            validated.report.violations[0].category,
            ViolationCategory::Text
        );
        assert!(validated.warnings.is_empty());
    }

    /// An accepted status is passed through without mutation beyond range
    /// clamping of the score.
    #[test]
    fn test_score_92_accepted_as_is() {
        let validated = validate_report(&valid_raw(92, "PASS"), &thresholds()).unwrap();

        assert_eq!(validated.report.score, 92);
        assert_eq!(validated.report.status, ComplianceStatus::Pass);
        assert!(validated.warnings.is_empty());
    }

    #[test]
    fn test_out_of_range_score_clamped_not_rejected() {
        let validated = validate_report(&valid_raw(150, "PASS"), &thresholds()).unwrap();
        assert_eq!(validated.report.score, 100);

        let validated = validate_report(&valid_raw(-5, "FAIL"), &thresholds()).unwrap();
        assert_eq!(validated.report.score, 0);
    }

    #[test]
    fn test_fractional_score_rounded() {
        let raw = valid_raw(0, "WARNING").replace("\"score\": 0", "\"score\": 74.6");
        let validated = validate_report(&raw, &thresholds()).unwrap();
        assert_eq!(validated.report.score, 75);
    }

    /// Inconsistent status/score pairings are surfaced, never rewritten.
    #[test]
    fn test_inconsistent_status_yields_warning_but_is_kept() {
        let validated = validate_report(&valid_raw(90, "FAIL"), &thresholds()).unwrap();

        assert_eq!(validated.report.status, ComplianceStatus::Fail);
        assert_eq!(validated.warnings.len(), 1);
        assert!(validated.warnings[0].contains("inconsistent with score 90"));
    }

    #[test]
    fn test_truncated_output_is_malformed() {
        let err = validate_report(r#"{"score": 75, "sta"#, &thresholds()).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn test_non_object_root_is_schema_violation() {
        let err = validate_report(r#"[1, 2, 3]"#, &thresholds()).unwrap_err();
        match err {
            AnalysisError::SchemaViolation { field, .. } => assert_eq!(field, "$"),
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_object_reports_missing_score() {
        let err = validate_report("{}", &thresholds()).unwrap_err();
        match err {
            AnalysisError::SchemaViolation { field, reason } => {
                assert_eq!(field, "score");
                assert!(reason.contains("missing"));
            }
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_overall_summary_identified() {
        let raw = r#"{
            "score": 100,
            "status": "PASS",
            "violations": []
        }"#;
        let err = validate_report(raw, &thresholds()).unwrap_err();
        match err {
            AnalysisError::SchemaViolation { field, .. } => {
                assert_eq!(field, "overall_summary");
            }
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_score_rejected_not_coerced() {
        let raw = valid_raw(0, "PASS").replace("\"score\": 0", "\"score\": \"95\"");
        let err = validate_report(&raw, &thresholds()).unwrap_err();
        match err {
            AnalysisError::SchemaViolation { field, reason } => {
                assert_eq!(field, "score");
                assert!(reason.contains("number"));
            }
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_severity_names_the_violation_field() {
        let raw = valid_raw(75, "WARNING").replace("CRITICAL", "SEVERE");
        let err = validate_report(&raw, &thresholds()).unwrap_err();
        match err {
            AnalysisError::SchemaViolation { field, reason } => {
                assert_eq!(field, "violations[0].severity");
                assert!(reason.contains("SEVERE"));
            }
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_status_value_rejected() {
        let err = validate_report(&valid_raw(75, "MAYBE"), &thresholds()).unwrap_err();
        match err {
            AnalysisError::SchemaViolation { field, .. } => assert_eq!(field, "status"),
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_clean_report_with_no_violations() {
        let raw = r#"{
            "score": 100,
            "status": "PASS",
            "violations": [],
            "overall_summary": "The ad is fully compliant."
        }"#;
        let validated = validate_report(raw, &thresholds()).unwrap();

        assert_eq!(validated.report.score, 100);
        assert!(validated.report.violations.is_empty());
        assert!(validated.warnings.is_empty());
    }

    #[test]
    fn test_status_for_score_boundaries() {
        let t = thresholds();
        assert_eq!(status_for_score(100, &t), ComplianceStatus::Pass);
        assert_eq!(status_for_score(80, &t), ComplianceStatus::Pass);
        assert_eq!(status_for_score(79, &t), ComplianceStatus::Warning);
        assert_eq!(status_for_score(50, &t), ComplianceStatus::Warning);
        assert_eq!(status_for_score(49, &t), ComplianceStatus::Fail);
        assert_eq!(status_for_score(0, &t), ComplianceStatus::Fail);
    }
}
