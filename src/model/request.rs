//! Inbound analysis request types

use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

/// Advertising platform whose policy rules are embedded into the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    Meta,
    Google,
    Tiktok,
}

impl Platform {
    /// Display name used in prompt text
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Meta => "Meta/Facebook",
            Platform::Google => "Google Ads",
            Platform::Tiktok => "TikTok",
        }
    }
}

/// Product category selecting category-specific sensitivities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    WeightLoss,
    HairLoss,
    Skincare,
    Supplements,
}

impl ProductCategory {
    /// Display name used in prompt text
    pub fn display_name(&self) -> &'static str {
        match self {
            ProductCategory::WeightLoss => "Weight Loss Products",
            ProductCategory::HairLoss => "Hair Loss Treatments",
            ProductCategory::Skincare => "Skincare Products",
            ProductCategory::Supplements => "Dietary Supplements",
        }
    }
}

/// Image reference accompanying the marketing copy
///
/// Modeled as a tagged variant so the mutual exclusivity of remote URL vs
/// inline payload is structural rather than runtime-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// Remote image, passed to the reasoning service by URL
    Remote(Url),
    /// Inline base64 payload with its media type
    Inline { media_type: String, data: String },
}

/// Error type for image reference construction
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ImageRefError {
    #[error("imageUrl and imageBase64 are mutually exclusive")]
    BothProvided,

    #[error("image URL is not valid: {0}")]
    InvalidUrl(String),

    #[error("inline image is not a base64 data URL")]
    InvalidDataUrl,
}

impl ImageRef {
    /// Build an optional image reference from the two wire-level fields
    ///
    /// The inbound contract carries `imageUrl` and `imageBase64` as separate
    /// optional strings; at most one may be set.
    pub fn from_parts(
        image_url: Option<String>,
        image_base64: Option<String>,
    ) -> Result<Option<Self>, ImageRefError> {
        match (image_url, image_base64) {
            (Some(_), Some(_)) => Err(ImageRefError::BothProvided),
            (Some(raw), None) => {
                let url =
                    Url::parse(&raw).map_err(|e| ImageRefError::InvalidUrl(e.to_string()))?;
                Ok(Some(ImageRef::Remote(url)))
            }
            (None, Some(raw)) => Ok(Some(Self::parse_data_url(&raw)?)),
            (None, None) => Ok(None),
        }
    }

    /// Parse a `data:<media-type>;base64,<payload>` URL into the inline variant
    fn parse_data_url(raw: &str) -> Result<Self, ImageRefError> {
        let rest = raw
            .strip_prefix("data:")
            .ok_or(ImageRefError::InvalidDataUrl)?;
        let (media_type, data) = rest
            .split_once(";base64,")
            .ok_or(ImageRefError::InvalidDataUrl)?;

        if media_type.is_empty() || data.is_empty() {
            return Err(ImageRefError::InvalidDataUrl);
        }

        Ok(ImageRef::Inline {
            media_type: media_type.to_string(),
            data: data.to_string(),
        })
    }

    /// URL form accepted by the reasoning service's image content part
    ///
    /// The payload is passed through unmodified; this service never fetches,
    /// decodes, or re-encodes images.
    pub fn as_image_url(&self) -> String {
        match self {
            ImageRef::Remote(url) => url.to_string(),
            ImageRef::Inline { media_type, data } => {
                format!("data:{media_type};base64,{data}")
            }
        }
    }
}

/// A single compliance analysis request, consumed once by the orchestrator
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub marketing_copy: String,
    pub image: Option<ImageRef>,
    pub platform: Platform,
    pub category: ProductCategory,
}
