use serde::Deserialize;
use tracing::warn;

use super::{clean_handle, Platform, ProfileSource};

/// Public repositories listed by the GitHub REST API.
pub struct GitHubSource;

#[derive(Debug, Deserialize)]
struct RepoRecord {
    name: String,
    description: Option<String>,
    language: Option<String>,
}

impl ProfileSource for GitHubSource {
    fn platform(&self) -> Platform {
        Platform::GitHub
    }

    fn profile_url(&self, identifier: &str) -> Option<String> {
        clean_handle(identifier).map(|user| format!("https://api.github.com/users/{user}/repos"))
    }

    /// One sentence group per described repository; undescribed repos are skipped.
    fn normalize(&self, raw: &str) -> String {
        let repos: Vec<RepoRecord> = match serde_json::from_str(raw) {
            Ok(repos) => repos,
            Err(e) => {
                warn!("GitHub response was not a repository list: {e}");
                return String::new();
            }
        };

        repos
            .iter()
            .filter_map(|repo| {
                let description = repo.description.as_deref().map(str::trim)?;
                if description.is_empty() {
                    return None;
                }
                Some(format!(
                    "{}. {}. Lang: {}.",
                    repo.name,
                    description,
                    repo.language.as_deref().unwrap_or("unknown")
                ))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
