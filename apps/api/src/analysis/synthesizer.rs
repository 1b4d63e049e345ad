//! Skill Synthesizer — résumé text plus profile summaries to a raw model reply.

use tracing::info;

use crate::analysis::prompts::{
    SKILL_PROFILE_PROMPT, SUMMARIES_HEADER, SYNTHESIS_MAX_OUTPUT_TOKENS, SYNTHESIS_TEMPERATURE,
};
use crate::analysis::summarizer::ProfileSummary;
use crate::errors::AppError;
use crate::llm_client::{GenerationRequest, GenerativeModel};

/// Builds the synthesis corpus. Without summaries it is the document text alone.
pub fn build_corpus(document_text: &str, summaries: &[ProfileSummary]) -> String {
    if summaries.is_empty() {
        return document_text.to_string();
    }
    let joined = summaries
        .iter()
        .map(|s| s.summary.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    format!("{document_text}{SUMMARIES_HEADER}{joined}")
}

/// Sends the corpus with the skill-profile instructions and returns the model's raw text.
pub async fn synthesize(
    model: &dyn GenerativeModel,
    document_text: &str,
    summaries: &[ProfileSummary],
) -> Result<String, AppError> {
    let corpus = build_corpus(document_text, summaries);
    info!(
        "Requesting skill profile synthesis ({} chars, {} summaries)",
        corpus.len(),
        summaries.len()
    );

    model
        .generate(GenerationRequest {
            parts: vec![SKILL_PROFILE_PROMPT.to_string(), corpus],
            max_output_tokens: Some(SYNTHESIS_MAX_OUTPUT_TOKENS),
            temperature: Some(SYNTHESIS_TEMPERATURE),
        })
        .await
        .map_err(|e| AppError::AiService(format!("Skill synthesis failed: {e}")))
}
