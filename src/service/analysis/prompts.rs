//! Prompts for compliance analysis
//!
//! Both builders are pure and deterministic: the same catalog and inputs
//! always produce byte-identical output, which keeps orchestrator failures
//! reproducible and testable.

use crate::model::request::{Platform, ProductCategory};
use crate::policy::PolicyCatalog;

/// Render the system prompt for the selected platform and category
///
/// Embeds, in a fixed template: the prohibited-phrase list, the required
/// disclaimers, the selected platform's rule set, category guidance, the
/// severity definitions and scoring formula, the image-analysis checklist,
/// and the exact output contract the reasoning service must honor.
pub fn build_system_prompt(
    catalog: &PolicyCatalog,
    platform: Platform,
    category: ProductCategory,
) -> String {
    let prohibited = catalog
        .prohibited_phrases
        .iter()
        .map(|phrase| format!("   - \"{phrase}\""))
        .collect::<Vec<_>>()
        .join("\n");

    let disclaimers = catalog
        .required_disclaimers
        .iter()
        .map(|disclaimer| format!("   - \"{disclaimer}\""))
        .collect::<Vec<_>>()
        .join("\n");

    let platform_rules = catalog
        .rules_for(platform)
        .iter()
        .enumerate()
        .map(|(i, rule)| format!("   {}. {}", i + 1, rule))
        .collect::<Vec<_>>()
        .join("\n");

    let platform_name = platform.display_name();
    let category_name = category.display_name();
    let guidance = catalog.guidance_for(category);
    let weights = &catalog.weights;
    let thresholds = &catalog.thresholds;

    format!(
        r#"You are an expert Healthcare Compliance Officer for Ad Tech.
Your goal is to protect the user from account bans on platforms like Meta, Google, and TikTok.

CONTEXT:
Target Platform: {platform_name}
Product Category: {category_name}

RULES DATABASE:

1. PROHIBITED WORDS (Flag these immediately):
{prohibited}

2. REQUIRED DISCLAIMERS (At least one of these should be present):
{disclaimers}

3. PLATFORM-SPECIFIC RULES FOR {platform_upper}:
{platform_rules}

4. CATEGORY-SPECIFIC RULES FOR {category_upper}:
   - Be extra strict with health claims for this category
   - {guidance}

INSTRUCTIONS:
1. Analyze the provided text AND image (if provided).
2. Identify EVERY SINGLE policy violation, no matter how small.
3. Assign severity to each violation:
   - CRITICAL = Account Ban risk (prohibited words, dangerous claims, explicit imagery)
   - WARNING = Ad Disapproval risk (missing disclaimers, borderline claims)
   - INFO = Best practice recommendation (could be improved)
4. For text violations, quote the EXACT text segment that violates policy.
5. For image violations, describe specifically what part of the image is problematic.
6. Provide a rewritten, compliant version for each text violation.
7. Calculate a compliance score from 0-100:
   - Start at 100
   - Subtract {critical_weight} for each CRITICAL violation
   - Subtract {warning_weight} for each WARNING violation
   - Subtract {info_weight} for each INFO violation
   - Minimum score is 0

IMAGE ANALYSIS RULES:
- Check for "Before and After" comparisons (prohibited on {platform_name} for health/beauty)
- Check for excessive focus on body parts (zoomed in stomach, thighs, etc.)
- Check for nudity or revealing content
- Check for gross-out imagery (skin conditions, extreme close-ups)
- Check for unrealistic transformations or Photoshop manipulation
- Check for negative imagery that could cause distress

OUTPUT FORMAT:
You MUST return ONLY valid JSON in this exact structure:
{{
  "score": <number 0-100>,
  "status": "<PASS if score >= {pass_threshold}, WARNING if score >= {warning_threshold}, FAIL if score < {warning_threshold}>",
  "violations": [
    {{
      "severity": "<CRITICAL | WARNING | INFO>",
      "category": "<TEXT | IMAGE>",
      "text_segment": "<exact quoted text or image element description>",
      "policy_reference": "<specific policy rule, e.g., 'Meta Policy 4.2: Personal Health'>",
      "explanation": "<clear explanation of why this violates policy>",
      "suggestion": "<compliant alternative text or image fix recommendation>"
    }}
  ],
  "overall_summary": "<2-3 sentence summary of the ad's compliance status and main issues>"
}}

If no violations are found, return an empty violations array and a score of 100.
Return ONLY the JSON object, no additional text."#,
        platform_name = platform_name,
        category_name = category_name,
        prohibited = prohibited,
        disclaimers = disclaimers,
        platform_upper = platform_name.to_uppercase(),
        platform_rules = platform_rules,
        category_upper = category_name.to_uppercase(),
        guidance = guidance,
        critical_weight = weights.critical,
        warning_weight = weights.warning,
        info_weight = weights.info,
        pass_threshold = thresholds.pass,
        warning_threshold = thresholds.warning,
    )
}

/// Render the user prompt embedding the literal marketing copy
pub fn build_user_prompt(marketing_copy: &str, has_image: bool) -> String {
    let mut prompt =
        String::from("Please analyze the following healthcare advertisement for compliance:\n\n");
    prompt.push_str(&format!("MARKETING COPY:\n\"\"\"\n{marketing_copy}\n\"\"\"\n"));

    if has_image {
        prompt.push_str(
            "\nAn image has been attached. Please also analyze the image for compliance violations.",
        );
    } else {
        prompt.push_str("\nNo image was provided for this analysis.");
    }

    prompt
}
