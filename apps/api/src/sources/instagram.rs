use scraper::{Html, Selector};

use super::{clean_handle, Platform, ProfileSource};

pub struct InstagramSource;

impl ProfileSource for InstagramSource {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    fn profile_url(&self, identifier: &str) -> Option<String> {
        clean_handle(identifier).map(|user| format!("https://www.instagram.com/{user}/"))
    }

    /// The bio is only exposed through the page's meta description.
    fn normalize(&self, raw: &str) -> String {
        let document = Html::parse_document(raw);
        let Ok(selector) = Selector::parse(r#"meta[name="description"]"#) else {
            return String::new();
        };

        document
            .select(&selector)
            .find_map(|meta| meta.value().attr("content"))
            .map(extract_bio)
            .unwrap_or_default()
    }
}

/// Pulls `<BIO>` out of
/// `"<N> Followers, <M> Following, <P> Posts - <BIO> from <Name> (@handle)"`.
///
/// Returns an empty string when the content does not follow that pattern.
pub fn extract_bio(content: &str) -> String {
    let Some((_, rest)) = content.split_once(" - ") else {
        return String::new();
    };
    match rest.rsplit_once(" from ") {
        Some((bio, _)) => bio.trim().to_string(),
        None => String::new(),
    }
}
