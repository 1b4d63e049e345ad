//! In-crate fakes for the two external collaborators: the model and the web.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;

use crate::config::{Config, SummaryFailurePolicy};
use crate::llm_client::{GenerationRequest, GenerativeModel, LlmError};
use crate::sources::PageFetcher;
use crate::state::AppState;

type Responder = Box<dyn Fn(&GenerationRequest) -> Result<String, LlmError> + Send + Sync>;

/// Records every request and answers through a responder closure.
pub struct FakeModel {
    responder: Responder,
    requests: Mutex<Vec<GenerationRequest>>,
    latency: Duration,
}

impl FakeModel {
    pub fn with(
        responder: impl Fn(&GenerationRequest) -> Result<String, LlmError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
            latency: Duration::ZERO,
        }
    }

    /// Every call sleeps for `latency` before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Answers the n-th call with `replies[n]`, repeating the last reply after that.
    pub fn replying(replies: &[&str]) -> Self {
        let replies: Vec<String> = replies.iter().map(|r| r.to_string()).collect();
        let calls = AtomicUsize::new(0);
        Self::with(move |_| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            Ok(replies[n.min(replies.len() - 1)].clone())
        })
    }

    pub fn failing() -> Self {
        Self::with(|_| Err(quota_error()))
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerativeModel for FakeModel {
    async fn generate(&self, request: GenerationRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        (self.responder)(&request)
    }
}

pub fn quota_error() -> LlmError {
    LlmError::Api {
        status: 429,
        message: "Resource has been exhausted (e.g. check quota).".to_string(),
    }
}

/// Serves canned pages by URL; unknown URLs behave like unreachable hosts.
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    fetched: Mutex<Vec<String>>,
    latency: Duration,
}

impl FakeFetcher {
    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    /// Every fetch sleeps for `latency` before returning.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> String {
        self.fetched.lock().unwrap().push(url.to_string());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.pages.get(url).cloned().unwrap_or_default()
    }
}

pub fn test_config() -> Config {
    Config {
        google_api_key: Some("test-key".to_string()),
        port: 0,
        rust_log: "debug".to_string(),
        cors_allowed_origin: None,
        fetch_timeout: Duration::from_secs(1),
        request_timeout: Duration::from_secs(30),
        summary_failure_policy: SummaryFailurePolicy::Strict,
        max_upload_bytes: 1024 * 1024,
    }
}

pub fn test_state(fetcher: Arc<FakeFetcher>, model: Option<Arc<FakeModel>>) -> AppState {
    AppState {
        config: test_config(),
        fetcher,
        llm: model.map(|m| m as Arc<dyn GenerativeModel>),
    }
}

/// One multipart part: field name, optional file content type, payload.
pub struct Part<'a> {
    pub name: &'a str,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

const BOUNDARY: &str = "flashlight-test-boundary";

pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part.content_type {
            Some(content_type) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"upload\"\r\nContent-Type: {content_type}\r\n\r\n",
                    part.name
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name)
                    .as_bytes(),
            ),
        }
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// A one-page PDF showing `text` in Helvetica, with a correct cross-reference table.
pub fn single_page_pdf(text: &str) -> Vec<u8> {
    let content = if text.is_empty() {
        String::new()
    } else {
        format!("BT /F1 24 Tf 72 720 Td ({text}) Tj ET")
    };
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >>".to_string(),
        format!("<< /Length {} >>\nstream\n{content}\nendstream", content.len()),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_string(),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, object) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{object}\nendobj\n", index + 1).as_bytes());
    }

    let xref_offset = pdf.len();
    pdf.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for offset in offsets {
        pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    pdf
}
