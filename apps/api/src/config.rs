use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

/// What the pipeline does when one platform's summary cannot be produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SummaryFailurePolicy {
    /// Any summarizer failure aborts the whole request.
    #[default]
    Strict,
    /// A failed summary is dropped and the remaining platforms are used.
    Lenient,
}

impl FromStr for SummaryFailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => Err(anyhow!(
                "SUMMARY_FAILURE_POLICY must be 'strict' or 'lenient', got '{other}'"
            )),
        }
    }
}

/// Application configuration loaded from environment variables.
///
/// The AI credential is optional on purpose: the server still starts without it
/// and every analysis request is rejected until it is configured.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub cors_allowed_origin: Option<String>,
    pub fetch_timeout: Duration,
    pub request_timeout: Duration,
    pub summary_failure_policy: SummaryFailurePolicy,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            google_api_key: optional_env("GOOGLE_API_KEY"),
            port: parse_env("PORT", 8000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            cors_allowed_origin: optional_env("CORS_ALLOWED_ORIGIN"),
            fetch_timeout: Duration::from_secs(parse_env("FETCH_TIMEOUT_SECS", 10)?),
            request_timeout: Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECS", 180)?),
            summary_failure_policy: parse_env(
                "SUMMARY_FAILURE_POLICY",
                SummaryFailurePolicy::Strict,
            )?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        })
    }
}

/// Returns the variable's value, treating unset and blank as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow!("{e}"))
            .with_context(|| format!("Environment variable '{key}' has an invalid value")),
        None => Ok(default),
    }
}
