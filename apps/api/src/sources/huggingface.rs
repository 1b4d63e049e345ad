use scraper::{Html, Selector};
use tracing::warn;

use super::{clean_handle, Platform, ProfileSource};

/// Headings the Hugging Face profile page uses for model and dataset names.
const HEADING_SELECTORS: &[&str] = &["h3.mb-1"];

pub struct HuggingFaceSource;

impl ProfileSource for HuggingFaceSource {
    fn platform(&self) -> Platform {
        Platform::HuggingFace
    }

    fn profile_url(&self, identifier: &str) -> Option<String> {
        clean_handle(identifier).map(|user| format!("https://huggingface.co/{user}"))
    }

    fn normalize(&self, raw: &str) -> String {
        let document = Html::parse_document(raw);
        let mut names = Vec::new();

        for selector in HEADING_SELECTORS {
            let selector = match Selector::parse(selector) {
                Ok(s) => s,
                Err(e) => {
                    warn!("Invalid heading selector '{selector}': {e:?}");
                    continue;
                }
            };
            for heading in document.select(&selector) {
                let text = heading.text().collect::<String>();
                let text = text.trim();
                if !text.is_empty() {
                    names.push(text.to_string());
                }
            }
        }

        names.join(" ")
    }
}
