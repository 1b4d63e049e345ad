//! Skill analysis pipeline — orchestrates one request from upload to profile.
//!
//! Flow: extract document text → fetch all sources concurrently → normalize and
//!       summarize each fetched source concurrently → synthesize → parse.
//!
//! Source fetches never fail the request; an unavailable source contributes
//! nothing. Summarizer failures follow `SummaryFailurePolicy`. Everything else
//! aborts the request. No step is retried. The whole run is bounded by
//! `deadline`; when it expires, or when the caller drops the future, in-flight
//! network fetches and model calls are cancelled with it. A PDF parse already
//! running on the blocking pool is not interrupted; it finishes and is discarded.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures::future::{join_all, try_join_all};
use tracing::{info, warn};

use crate::analysis::document::extract_text;
use crate::analysis::models::SkillProfile;
use crate::analysis::response_parser::parse_skill_profile;
use crate::analysis::summarizer::{summarize, ProfileSummary};
use crate::analysis::synthesizer::synthesize;
use crate::config::SummaryFailurePolicy;
use crate::errors::AppError;
use crate::llm_client::GenerativeModel;
use crate::sources::{PageFetcher, Platform, PlatformRef, ProfileLinks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStage {
    Received,
    DocumentExtracted,
    SourcesFetched,
    SourcesSummarized,
    Synthesized,
    Parsed,
    Done,
}

/// Raw page content for one platform. Empty when the fetch failed.
#[derive(Debug, Clone)]
struct RawFetch {
    platform: Platform,
    text: String,
}

#[derive(Clone)]
pub struct SkillAnalyzer {
    fetcher: Arc<dyn PageFetcher>,
    model: Arc<dyn GenerativeModel>,
    summary_policy: SummaryFailurePolicy,
    deadline: Duration,
}

impl SkillAnalyzer {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        model: Arc<dyn GenerativeModel>,
        summary_policy: SummaryFailurePolicy,
        deadline: Duration,
    ) -> Self {
        Self {
            fetcher,
            model,
            summary_policy,
            deadline,
        }
    }

    /// Runs the full pipeline for one uploaded résumé.
    pub async fn analyze(
        &self,
        document: Bytes,
        links: &ProfileLinks,
    ) -> Result<SkillProfile, AppError> {
        let mut stage = AnalysisStage::Received;
        let result = self
            .within_deadline(self.run(document, links, &mut stage))
            .await;

        match &result {
            Ok(_) => advance(&mut stage, AnalysisStage::Done),
            Err(e) => warn!(failed_after = ?stage, "Skill analysis failed: {e}"),
        }
        result
    }

    async fn within_deadline<F>(&self, work: F) -> Result<SkillProfile, AppError>
    where
        F: Future<Output = Result<SkillProfile, AppError>>,
    {
        tokio::time::timeout(self.deadline, work)
            .await
            .unwrap_or_else(|_| Err(AppError::Timeout(self.deadline.as_secs())))
    }

    async fn run(
        &self,
        document: Bytes,
        links: &ProfileLinks,
        stage: &mut AnalysisStage,
    ) -> Result<SkillProfile, AppError> {
        let cv_text = extract_text(document).await?;
        advance(stage, AnalysisStage::DocumentExtracted);
        self.run_stages(&cv_text, links, stage).await
    }

    async fn run_stages(
        &self,
        cv_text: &str,
        links: &ProfileLinks,
        stage: &mut AnalysisStage,
    ) -> Result<SkillProfile, AppError> {
        let fetched = self.fetch_sources(&links.references()).await;
        advance(stage, AnalysisStage::SourcesFetched);

        let summaries = self.summarize_sources(&fetched).await?;
        advance(stage, AnalysisStage::SourcesSummarized);

        let raw_response = synthesize(self.model.as_ref(), cv_text, &summaries).await?;
        advance(stage, AnalysisStage::Synthesized);

        let profile = parse_skill_profile(&raw_response)?;
        advance(stage, AnalysisStage::Parsed);

        Ok(profile)
    }

    /// Fetches every referenced platform at once and waits for all of them.
    async fn fetch_sources(&self, references: &[PlatformRef]) -> Vec<RawFetch> {
        let fetches = references.iter().map(|reference| async move {
            let source = reference.platform.source();
            let text = match source.profile_url(&reference.identifier) {
                Some(url) => self.fetcher.fetch(&url).await,
                None => {
                    warn!(
                        "Skipping {}: '{}' is not a valid identifier",
                        reference.platform, reference.identifier
                    );
                    String::new()
                }
            };
            RawFetch {
                platform: reference.platform,
                text,
            }
        });
        join_all(fetches).await
    }

    /// Normalizes and summarizes every non-empty fetch concurrently.
    async fn summarize_sources(
        &self,
        fetched: &[RawFetch],
    ) -> Result<Vec<ProfileSummary>, AppError> {
        let model = self.model.as_ref();
        let jobs = fetched
            .iter()
            .filter(|raw| !raw.text.is_empty())
            .map(|raw| async move {
                let normalized = raw.platform.source().normalize(&raw.text);
                summarize(model, raw.platform, &normalized).await
            });

        let outcomes: Vec<Option<ProfileSummary>> = match self.summary_policy {
            SummaryFailurePolicy::Strict => try_join_all(jobs).await?,
            SummaryFailurePolicy::Lenient => join_all(jobs)
                .await
                .into_iter()
                .filter_map(|outcome| match outcome {
                    Ok(summary) => Some(summary),
                    Err(e) => {
                        warn!("Dropping profile summary: {e}");
                        None
                    }
                })
                .collect(),
        };

        Ok(outcomes.into_iter().flatten().collect())
    }
}

fn advance(stage: &mut AnalysisStage, next: AnalysisStage) {
    info!(stage = ?next, "Analysis stage reached");
    *stage = next;
}
