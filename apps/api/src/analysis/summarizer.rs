//! Profile Summarizer — one short model-written summary per platform.

use serde::Serialize;

use crate::analysis::prompts::SUMMARY_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::{GenerationRequest, GenerativeModel};
use crate::sources::Platform;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSummary {
    pub platform: Platform,
    pub summary: String,
}

/// Summarizes one platform's normalized text.
///
/// Empty input returns `Ok(None)` without calling the model.
pub async fn summarize(
    model: &dyn GenerativeModel,
    platform: Platform,
    profile_text: &str,
) -> Result<Option<ProfileSummary>, AppError> {
    if profile_text.trim().is_empty() {
        return Ok(None);
    }

    let prompt = SUMMARY_PROMPT_TEMPLATE
        .replace("{platform_name}", platform.display_name())
        .replace("{profile_text}", profile_text);

    let summary = model
        .generate(GenerationRequest::new(vec![prompt]))
        .await
        .map_err(|e| AppError::AiService(format!("{platform} summary failed: {e}")))?;

    Ok(Some(ProfileSummary {
        platform,
        summary: summary.trim().to_string(),
    }))
}
