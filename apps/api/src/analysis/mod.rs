// Skill analysis: résumé text + public profiles → structured skill profile.
// All model calls go through llm_client::GenerativeModel; all network fetches
// through sources::PageFetcher.

pub mod document;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod response_parser;
pub mod summarizer;
pub mod synthesizer;
