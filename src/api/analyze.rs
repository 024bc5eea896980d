//! REST API endpoint for compliance analysis

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::api::error::ApiError;
use crate::model::report::{
    ComplianceReport, ComplianceStatus, Severity, Violation, ViolationCategory,
};
use crate::model::request::{AnalysisRequest, ImageRef, Platform, ProductCategory};
use crate::service::analysis::AnalysisService;

/// Inbound analysis request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Marketing copy to analyze (must be non-empty after trimming)
    pub marketing_copy: String,
    /// Remote image URL (mutually exclusive with imageBase64)
    pub image_url: Option<String>,
    /// Inline image as a base64 data URL (mutually exclusive with imageUrl)
    pub image_base64: Option<String>,
    pub platform: Platform,
    pub category: ProductCategory,
}

/// Analysis response envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ComplianceReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Analyze an advertisement for policy compliance
#[utoipa::path(
    post,
    path = "/v1/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis completed", body = AnalyzeResponse),
        (status = 400, description = "Invalid request", body = AnalyzeResponse),
        (status = 502, description = "Reasoning service failure", body = AnalyzeResponse)
    ),
    tag = "analysis"
)]
#[post("/v1/analyze")]
pub async fn analyze(
    service: web::Data<AnalysisService>,
    body: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();

    let image = ImageRef::from_parts(body.image_url, body.image_base64)
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

    let request = AnalysisRequest {
        marketing_copy: body.marketing_copy,
        image,
        platform: body.platform,
        category: body.category,
    };

    let validated = service.analyze(&request).await?;

    Ok(HttpResponse::Ok().json(AnalyzeResponse {
        success: true,
        data: Some(validated.report),
        error: None,
    }))
}

/// Configure analysis routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(analyze);
}

#[derive(OpenApi)]
#[openapi(
    paths(analyze, crate::api::health::liveness, crate::api::health::readiness),
    components(schemas(
        AnalyzeRequest,
        AnalyzeResponse,
        ComplianceReport,
        Violation,
        Severity,
        ViolationCategory,
        ComplianceStatus,
        Platform,
        ProductCategory,
    )),
    tags(
        (name = "analysis", description = "Compliance analysis endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
