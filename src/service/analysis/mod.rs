//! Compliance analysis orchestration
//!
//! Builds policy-grounded prompts, performs exactly one reasoning-service
//! call per request, and validates the raw response into a typed report.
//! No retries, no persistence.

use std::sync::Arc;
use std::time::Instant;

use crate::model::request::AnalysisRequest;
use crate::policy::PolicyCatalog;
use crate::service::llm::{CompletionRequest, ReasoningClient};

pub mod error;
pub mod prompts;
pub mod validation;

pub use error::AnalysisError;
pub use validation::ValidatedReport;

/// Fixed sampling temperature favoring deterministic judgments
const TEMPERATURE: f32 = 0.3;

/// Upper bound on completion length
const MAX_TOKENS: u32 = 4_000;

/// Service orchestrating a single compliance analysis
pub struct AnalysisService {
    client: Arc<dyn ReasoningClient>,
    catalog: Arc<PolicyCatalog>,
}

impl AnalysisService {
    pub fn new(client: Arc<dyn ReasoningClient>, catalog: Arc<PolicyCatalog>) -> Self {
        Self { client, catalog }
    }

    pub fn catalog(&self) -> &PolicyCatalog {
        &self.catalog
    }

    /// Analyze one advertisement for policy compliance
    ///
    /// Preconditions: marketing copy non-empty after trimming (image
    /// exclusivity is structural via `ImageRef`). Precondition failure
    /// yields `InvalidRequest` with no upstream call made.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<ValidatedReport, AnalysisError> {
        if request.marketing_copy.trim().is_empty() {
            return Err(AnalysisError::InvalidRequest(
                "marketingCopy must not be empty".to_string(),
            ));
        }

        let system_prompt =
            prompts::build_system_prompt(&self.catalog, request.platform, request.category);
        let user_text =
            prompts::build_user_prompt(&request.marketing_copy, request.image.is_some());
        let prompt_length = system_prompt.len() + user_text.len();

        let completion_request = CompletionRequest {
            system_prompt,
            user_text,
            image: request.image.clone(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let start_time = Instant::now();

        tracing::debug!(
            platform = ?request.platform,
            category = ?request.category,
            has_image = request.image.is_some(),
            prompt_length = prompt_length,
            "Initiating reasoning service call for compliance analysis"
        );

        let raw = match self.client.complete(&completion_request).await {
            Ok(raw) => {
                tracing::info!(
                    elapsed_ms = start_time.elapsed().as_millis() as u64,
                    prompt_length = prompt_length,
                    "Reasoning service call completed"
                );
                raw
            }
            Err(e) => {
                tracing::error!(
                    elapsed_ms = start_time.elapsed().as_millis() as u64,
                    error = %e,
                    "Reasoning service call failed"
                );
                return Err(AnalysisError::ServiceError(e.to_string()));
            }
        };

        let raw = match raw {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Err(AnalysisError::EmptyResponse),
        };

        let validated = validation::validate_report(&raw, &self.catalog.thresholds)?;

        for warning in &validated.warnings {
            tracing::warn!(warning = %warning, "Compliance report quality warning");
        }
        tracing::debug!(
            score = validated.report.score,
            violations = validated.report.violations.len(),
            "Compliance report validated"
        );

        Ok(validated)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::model::request::{ImageRef, Platform, ProductCategory};
    use crate::service::llm::ReasoningError;

    enum MockResponse {
        Text(&'static str),
        Empty,
        Error(&'static str),
    }

    struct MockClient {
        calls: AtomicUsize,
        response: MockResponse,
    }

    impl MockClient {
        fn new(response: MockResponse) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReasoningClient for MockClient {
        async fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> Result<Option<String>, ReasoningError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                MockResponse::Text(text) => Ok(Some(text.to_string())),
                MockResponse::Empty => Ok(None),
                MockResponse::Error(message) => Err(ReasoningError::Api {
                    status: 429,
                    message: message.to_string(),
                }),
            }
        }
    }

    fn service(client: Arc<MockClient>) -> AnalysisService {
        AnalysisService::new(client, Arc::new(PolicyCatalog::default()))
    }

    fn request(marketing_copy: &str) -> AnalysisRequest {
        AnalysisRequest {
            marketing_copy: marketing_copy.to_string(),
            image: None,
            platform: Platform::Meta,
            category: ProductCategory::WeightLoss,
        }
    }

    const CRITICAL_REPORT: &str = r#"{
        "score": 75,
        "status": "WARNING",
        "violations": [
            {
                "severity": "CRITICAL",
                "category": "TEXT",
                "text_segment": "Guaranteed",
                "policy_reference": "Meta Policy 4.2: Personal Health",
                "explanation": "Absolute result claims are prohibited",
                "suggestion": "May support your weight loss goals"
            }
        ],
        "overall_summary": "The copy contains a prohibited absolute claim."
    }"#;

    #[tokio::test]
    async fn test_critical_violation_report_passes_through() {
        let client = Arc::new(MockClient::new(MockResponse::Text(CRITICAL_REPORT)));
        let service = service(client.clone());

        let validated = service
            .analyze(&request("Guaranteed weight loss in 7 days!"))
            .await
            .unwrap();

        assert_eq!(validated.report.score, 75);
        assert_eq!(validated.report.violations.len(), 1);
        assert_eq!(
            validated.report.violations[0].text_segment,
            "Guaranteed"
        );
        assert!(validated.warnings.is_empty());
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_copy_rejected_without_upstream_call() {
        let client = Arc::new(MockClient::new(MockResponse::Text(CRITICAL_REPORT)));
        let service = service(client.clone());

        let err = service.analyze(&request("   \n\t ")).await.unwrap_err();

        assert!(matches!(err, AnalysisError::InvalidRequest(_)));
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_upstream_failure_becomes_service_error() {
        let client = Arc::new(MockClient::new(MockResponse::Error("quota exceeded")));
        let service = service(client.clone());

        let err = service.analyze(&request("Some copy")).await.unwrap_err();

        match err {
            AnalysisError::ServiceError(message) => {
                assert!(message.contains("quota exceeded"));
                assert!(message.contains("429"));
            }
            other => panic!("expected ServiceError, got {other:?}"),
        }
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_content_becomes_empty_response() {
        let client = Arc::new(MockClient::new(MockResponse::Empty));
        let service = service(client);

        let err = service.analyze(&request("Some copy")).await.unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_whitespace_content_becomes_empty_response() {
        let client = Arc::new(MockClient::new(MockResponse::Text("   ")));
        let service = service(client);

        let err = service.analyze(&request("Some copy")).await.unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_truncated_output_becomes_malformed_response() {
        let client = Arc::new(MockClient::new(MockResponse::Text(r#"{"score": 75,"#)));
        let service = service(client);

        let err = service.analyze(&request("Some copy")).await.unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_empty_object_becomes_schema_violation_for_score() {
        let client = Arc::new(MockClient::new(MockResponse::Text("{}")));
        let service = service(client);

        let err = service.analyze(&request("Some copy")).await.unwrap_err();
        match err {
            AnalysisError::SchemaViolation { field, .. } => assert_eq!(field, "score"),
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_inconsistent_status_surfaced_as_warning() {
        let raw = CRITICAL_REPORT.replace("\"status\": \"WARNING\"", "\"status\": \"FAIL\"");
        let raw: &'static str = Box::leak(raw.into_boxed_str());
        let client = Arc::new(MockClient::new(MockResponse::Text(raw)));
        let service = service(client);

        let validated = service.analyze(&request("Some copy")).await.unwrap();

        assert_eq!(validated.warnings.len(), 1);
        assert!(validated.warnings[0].contains("inconsistent"));
    }

    #[tokio::test]
    async fn test_image_is_forwarded_to_completion() {
        let client = Arc::new(MockClient::new(MockResponse::Text(CRITICAL_REPORT)));
        let service = service(client.clone());

        let mut req = request("Copy with image");
        req.image = Some(ImageRef::Inline {
            media_type: "image/png".to_string(),
            data: "aGVsbG8=".to_string(),
        });

        service.analyze(&req).await.unwrap();
        assert_eq!(client.call_count(), 1);
    }
}
