//! Profile sources — fetching and normalizing public profile data.
//!
//! Every platform is one `ProfileSource` implementation: it knows how to turn a
//! caller-supplied identifier into a URL and how to reduce the fetched page to
//! the text worth summarizing. Network access goes through `PageFetcher`, which
//! never fails: an unavailable source simply yields empty text.

pub mod fetcher;
pub mod github;
pub mod huggingface;
pub mod instagram;
pub mod portfolio;

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

pub use fetcher::HttpFetcher;

/// Retrieves raw page content. Implementations absorb every failure and return
/// an empty string instead.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> String;
}

/// One external platform the analysis can draw on.
pub trait ProfileSource: Send + Sync {
    fn platform(&self) -> Platform;

    /// Builds the URL to fetch, or `None` if the identifier cannot name a profile.
    fn profile_url(&self, identifier: &str) -> Option<String>;

    /// Extracts meaningful text from the raw fetched content. Pure; malformed
    /// input yields an empty string.
    fn normalize(&self, raw: &str) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Platform {
    GitHub,
    HuggingFace,
    PersonalWebsite,
    Instagram,
}

impl Platform {
    /// Processing order; summaries appear in the corpus in this order.
    pub const ALL: [Platform; 4] = [
        Platform::GitHub,
        Platform::HuggingFace,
        Platform::PersonalWebsite,
        Platform::Instagram,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Platform::GitHub => "GitHub",
            Platform::HuggingFace => "Hugging Face",
            Platform::PersonalWebsite => "Personal Website",
            Platform::Instagram => "Instagram",
        }
    }

    pub fn source(self) -> &'static dyn ProfileSource {
        match self {
            Platform::GitHub => &github::GitHubSource,
            Platform::HuggingFace => &huggingface::HuggingFaceSource,
            Platform::PersonalWebsite => &portfolio::PortfolioSource,
            Platform::Instagram => &instagram::InstagramSource,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Optional identifiers supplied with an analysis request.
#[derive(Debug, Clone, Default)]
pub struct ProfileLinks {
    pub github_user: Option<String>,
    pub huggingface_user: Option<String>,
    pub portfolio_url: Option<String>,
    pub instagram_user: Option<String>,
}

/// A platform paired with the identifier to look up on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformRef {
    pub platform: Platform,
    pub identifier: String,
}

impl ProfileLinks {
    /// Platforms with a non-blank identifier, in processing order.
    pub fn references(&self) -> Vec<PlatformRef> {
        Platform::ALL
            .into_iter()
            .filter_map(|platform| {
                let value = match platform {
                    Platform::GitHub => &self.github_user,
                    Platform::HuggingFace => &self.huggingface_user,
                    Platform::PersonalWebsite => &self.portfolio_url,
                    Platform::Instagram => &self.instagram_user,
                };
                let identifier = value.as_deref().map(str::trim).filter(|v| !v.is_empty())?;
                Some(PlatformRef {
                    platform,
                    identifier: identifier.to_string(),
                })
            })
            .collect()
    }
}

/// Normalizes a username-style handle: drops a leading `@` and rejects anything
/// that is not a plain account name.
pub(crate) fn clean_handle(identifier: &str) -> Option<&str> {
    let handle = identifier.trim().trim_start_matches('@');
    let valid = !handle.is_empty()
        && handle
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    valid.then_some(handle)
}
