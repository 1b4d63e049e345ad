use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::PageFetcher;

/// Some platforms serve a login wall or an error page to non-browser clients.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// `PageFetcher` over HTTP. Follows redirects and bounds each request by `timeout`.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().user_agent(BROWSER_USER_AGENT).build()?;
        Ok(Self { client, timeout })
    }

    async fn try_fetch(&self, url: &str) -> reqwest::Result<String> {
        self.client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> String {
        let url = normalize_url(url);
        match self.try_fetch(&url).await {
            Ok(body) => {
                debug!("Fetched {} bytes from {url}", body.len());
                body
            }
            Err(e) => {
                warn!("Could not fetch data from {url}: {e}");
                String::new()
            }
        }
    }
}

/// Prefixes `https://` when the URL carries no scheme.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}
