//! GitHub API client
//!
//! Minimal GitHub API client for counting repositories through the search endpoint.

use super::language_param::search_query;
use crate::Result;
use chrono::{DateTime, Utc};
use ohno::{IntoAppError, app_err};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;

const LOG_TARGET: &str = "    search";

/// Default base URL of the GitHub REST API.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Outcome of one repository search as reported by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SearchCount {
    pub total_count: u64,

    /// Set when the search timed out server-side and `total_count` is an estimate.
    #[serde(default)]
    pub incomplete_results: bool,
}

/// A remote service able to count repositories for a keyword and language token.
///
/// Any error is treated as transient by the caller.
pub trait SearchBackend: Send + Sync {
    fn count_repositories(&self, keyword: Option<&str>, language_token: &str) -> impl Future<Output = Result<SearchCount>> + Send;
}

/// Rate limit information from response headers
#[derive(Debug, Clone, Copy)]
pub struct RateLimitInfo {
    pub remaining: usize,
    pub reset_at: DateTime<Utc>,
}

/// GitHub search API client
#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Create a new GitHub client with optional authentication token and base URL
    pub fn new(token: Option<&str>, base_url: impl Into<String>) -> Result<Self> {
        use reqwest::header::AUTHORIZATION;

        let mut headers = HeaderMap::new();
        let _ = headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("token {t}"))?;
            auth_val.set_sensitive(true);
            let _ = headers.insert(AUTHORIZATION, auth_val);
        }

        let client = reqwest::Client::builder()
            .user_agent("lang-rank")
            .default_headers(headers)
            .build()?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL for this client
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the search request for a keyword and language token.
    #[must_use]
    pub fn search_url(&self, keyword: Option<&str>, language_token: &str) -> String {
        format!(
            "{}/search/repositories?q={}&per_page=1",
            self.base_url,
            search_query(keyword, language_token)
        )
    }
}

impl SearchBackend for Client {
    async fn count_repositories(&self, keyword: Option<&str>, language_token: &str) -> Result<SearchCount> {
        let url = self.search_url(keyword, language_token);
        log::debug!(target: LOG_TARGET, "GET {url}");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .into_app_err_with(|| format!("sending search request '{url}'"))?;

        if let Some(rate_limit) = extract_rate_limit_from_headers(resp.headers()) {
            log::debug!(
                target: LOG_TARGET,
                "{} search requests remaining until {}",
                rate_limit.remaining,
                rate_limit.reset_at
            );
        }

        let status = resp.status();
        if !status.is_success() {
            return Err(app_err!("search request '{url}' failed with status {status}"));
        }

        resp.json::<SearchCount>()
            .await
            .into_app_err_with(|| format!("parsing search response for '{url}'"))
    }
}

/// Extract rate limit information from API response headers
fn extract_rate_limit_from_headers(headers: &HeaderMap) -> Option<RateLimitInfo> {
    let remaining = headers.get("x-ratelimit-remaining")?.to_str().ok()?.parse::<usize>().ok()?;

    let reset_timestamp = headers.get("x-ratelimit-reset")?.to_str().ok()?.parse::<i64>().ok()?;

    let reset_at = DateTime::from_timestamp(reset_timestamp, 0)?;

    Some(RateLimitInfo { remaining, reset_at })
}
