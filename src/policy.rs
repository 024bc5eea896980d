//! Static advertising-policy reference data
//!
//! The catalog is process-wide immutable reference data embedded into every
//! prompt. It is constructed and injected (never ambient global state) so
//! tests can substitute alternate catalogs, and it can be overridden from the
//! YAML config file. Stability within a catalog version is what makes prompts
//! reproducible across runs.

use serde::Deserialize;

use crate::model::request::{Platform, ProductCategory};

/// Phrases that must be flagged immediately when present in ad copy
const PROHIBITED_PHRASES: &[&str] = &[
    "cure",
    "cures",
    "cured",
    "miracle",
    "miraculous",
    "guaranteed",
    "guarantee",
    "permanent fix",
    "permanently",
    "fda approved",
    "fda-approved",
    "clinically proven",
    "doctor recommended",
    "100% effective",
    "instant results",
    "works instantly",
    "overnight results",
    "eliminate",
    "eradicate",
    "never fail",
    "risk-free",
];

/// Disclaimers, at least one of which should be present
const REQUIRED_DISCLAIMERS: &[&str] = &[
    "Results may vary",
    "Consult a physician",
    "Consult your doctor",
    "Individual results may vary",
    "Not intended to diagnose, treat, cure, or prevent any disease",
    "These statements have not been evaluated by the FDA",
];

const META_RULES: &[&str] = &[
    "No \"Before and After\" images for weight loss, cosmetics, or body transformation",
    "No images focusing on specific body parts (zoomed in)",
    "No \"negative self-perception\" copy that makes users feel bad about themselves",
    "No claims of specific weight loss amounts (e.g., \"Lose 10 lbs\")",
    "No unrealistic expectations or transformations",
    "Personal health attributes must not be assumed",
];

const GOOGLE_RULES: &[&str] = &[
    "No speculative or experimental medical treatment claims",
    "No unproven or misleading claims about health products",
    "Healthcare must be provided by qualified professionals",
    "No promotion of unapproved pharmaceuticals",
    "Must comply with local healthcare advertising laws",
];

const TIKTOK_RULES: &[&str] = &[
    "No promotion of weight loss products to minors",
    "No before/after content showing unrealistic transformations",
    "No content promoting unhealthy body standards",
    "Must include appropriate age restrictions for supplements",
    "No claims contradicting medical consensus",
];

fn to_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Points subtracted per violation by severity
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub critical: u32,
    pub warning: u32,
    pub info: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            critical: 25,
            warning: 10,
            info: 3,
        }
    }
}

/// Score thresholds for status classification
///
/// PASS at or above `pass`, WARNING at or above `warning`, FAIL below.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScoreThresholds {
    pub pass: u8,
    pub warning: u8,
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            pass: 80,
            warning: 50,
        }
    }
}

/// Per-platform policy rule sets
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlatformRules {
    pub meta: Vec<String>,
    pub google: Vec<String>,
    pub tiktok: Vec<String>,
}

impl Default for PlatformRules {
    fn default() -> Self {
        Self {
            meta: to_vec(META_RULES),
            google: to_vec(GOOGLE_RULES),
            tiktok: to_vec(TIKTOK_RULES),
        }
    }
}

/// Per-category sensitivity guidance
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CategoryGuidance {
    pub weight_loss: String,
    pub hair_loss: String,
    pub skincare: String,
    pub supplements: String,
}

impl Default for CategoryGuidance {
    fn default() -> Self {
        Self {
            weight_loss: "Weight loss: No specific weight claims, no body shaming".to_string(),
            hair_loss: "Hair loss: No guaranteed regrowth claims".to_string(),
            skincare: "Skincare: No \"anti-aging miracle\" claims".to_string(),
            supplements: "Supplements: Must not claim to treat/cure diseases".to_string(),
        }
    }
}

/// The full policy catalog embedded into prompts
///
/// Every field defaults to the built-in data; a YAML override may replace
/// any subset of fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PolicyCatalog {
    pub prohibited_phrases: Vec<String>,
    pub required_disclaimers: Vec<String>,
    pub platform_rules: PlatformRules,
    pub category_guidance: CategoryGuidance,
    pub weights: ScoringWeights,
    pub thresholds: ScoreThresholds,
}

impl Default for PolicyCatalog {
    fn default() -> Self {
        Self {
            prohibited_phrases: to_vec(PROHIBITED_PHRASES),
            required_disclaimers: to_vec(REQUIRED_DISCLAIMERS),
            platform_rules: PlatformRules::default(),
            category_guidance: CategoryGuidance::default(),
            weights: ScoringWeights::default(),
            thresholds: ScoreThresholds::default(),
        }
    }
}

impl PolicyCatalog {
    /// Rule set for the selected platform
    pub fn rules_for(&self, platform: Platform) -> &[String] {
        match platform {
            Platform::Meta => &self.platform_rules.meta,
            Platform::Google => &self.platform_rules.google,
            Platform::Tiktok => &self.platform_rules.tiktok,
        }
    }

    /// Sensitivity guidance for the selected product category
    pub fn guidance_for(&self, category: ProductCategory) -> &str {
        match category {
            ProductCategory::WeightLoss => &self.category_guidance.weight_loss,
            ProductCategory::HairLoss => &self.category_guidance.hair_loss,
            ProductCategory::Skincare => &self.category_guidance.skincare,
            ProductCategory::Supplements => &self.category_guidance.supplements,
        }
    }
}
