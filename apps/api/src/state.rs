use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::GenerativeModel;
use crate::sources::PageFetcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Shared HTTP fetcher for public profile sources.
    pub fetcher: Arc<dyn PageFetcher>,
    /// `None` when GOOGLE_API_KEY was missing at start-up; analysis requests are
    /// then rejected with `MissingConfiguration`.
    pub llm: Option<Arc<dyn GenerativeModel>>,
}
