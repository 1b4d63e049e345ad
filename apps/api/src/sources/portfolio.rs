use scraper::{Html, Node, Selector};

use super::fetcher::normalize_url;
use super::{Platform, ProfileSource};

/// Elements whose text is navigation or code rather than content.
const EXCLUDED_TAGS: &[&str] = &["script", "style", "nav", "footer", "header"];

/// Any personal site given by URL.
pub struct PortfolioSource;

impl ProfileSource for PortfolioSource {
    fn platform(&self) -> Platform {
        Platform::PersonalWebsite
    }

    fn profile_url(&self, identifier: &str) -> Option<String> {
        let url = identifier.trim();
        (!url.is_empty()).then(|| normalize_url(url))
    }

    /// Visible body text with boilerplate subtrees dropped, one space between fragments.
    fn normalize(&self, raw: &str) -> String {
        let document = Html::parse_document(raw);
        let Ok(body_selector) = Selector::parse("body") else {
            return String::new();
        };
        let Some(body) = document.select(&body_selector).next() else {
            return String::new();
        };

        body.descendants()
            .filter_map(|node| {
                let text = match node.value() {
                    Node::Text(text) => text.trim(),
                    _ => return None,
                };
                if text.is_empty() {
                    return None;
                }
                let excluded = node.ancestors().any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .is_some_and(|el| EXCLUDED_TAGS.contains(&el.name()))
                });
                (!excluded).then_some(text)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
