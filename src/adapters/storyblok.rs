//! Storyblok Management API client.
//!
//! Authenticates with a personal OAuth token, walks paginated collections
//! via the `total` response header and backs off on `429 Too Many Requests`.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use super::ManagementApi;
use crate::config::SyncConfig;

/// Page size for collection requests (API maximum)
pub const PER_PAGE: usize = 100;

/// Management API client
pub struct StoryblokClient {
    /// API base URL including version, e.g. `https://mapi.storyblok.com/v1`
    base_url: String,
    /// Personal OAuth token
    token: String,
    /// Retries after a 429 before giving up
    max_retries: u32,
    /// Base delay, multiplied by the attempt number
    retry_delay: Duration,
    /// HTTP client
    client: reqwest::Client,
}

impl StoryblokClient {
    /// Create a new client
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            max_retries: 5,
            retry_delay: Duration::from_millis(500),
            client: reqwest::Client::new(),
        }
    }

    /// Create for the configured region
    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(config.region.management_api_url(), config.token.clone())
    }

    /// Override the 429 retry policy
    pub fn with_retries(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    /// Build API URL
    fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Send a request, retrying while the API reports rate limiting
    async fn send(&self, method: Method, url: &str, body: Option<&Value>) -> Result<Response> {
        let mut attempt = 0;

        loop {
            let mut request = self
                .client
                .request(method.clone(), url)
                .header(AUTHORIZATION, &self.token);
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request
                .send()
                .await
                .with_context(|| format!("Failed to send {} {}", method, url))?;

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS && attempt < self.max_retries {
                attempt += 1;
                let delay = backoff(self.retry_delay, attempt);
                warn!(%url, attempt, ?delay, "Rate limited, retrying");
                tokio::time::sleep(delay).await;
                continue;
            }

            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                anyhow::bail!("Management API error ({}) for {} {}: {}", status, method, url, text);
            }

            return Ok(response);
        }
    }
}

#[async_trait]
impl ManagementApi for StoryblokClient {
    async fn list_all(&self, path: &str) -> Result<Vec<Value>> {
        let key = collection_key(path);
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let url = page_url(&self.api_url(path), page);
            let response = self.send(Method::GET, &url, None).await?;

            let total = response
                .headers()
                .get("total")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<usize>().ok());

            let mut body: Value = response
                .json()
                .await
                .with_context(|| format!("Failed to parse response of {}", url))?;

            let batch = match body.get_mut(key).map(Value::take) {
                Some(Value::Array(batch)) => batch,
                _ => anyhow::bail!("Response of {} has no `{}` array", url, key),
            };

            let count = batch.len();
            items.extend(batch);
            debug!(path, page, count, ?total, "Fetched page");

            if is_last_page(count, items.len(), total) {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    async fn get(&self, path: &str) -> Result<Value> {
        let url = self.api_url(path);
        self.send(Method::GET, &url, None)
            .await?
            .json()
            .await
            .with_context(|| format!("Failed to parse response of {}", url))
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.api_url(path);
        let response = self.send(Method::PUT, &url, Some(body)).await?;
        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response of {}", url))?;

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).with_context(|| format!("Failed to parse response of {}", url))
    }
}

/// Response key holding a collection's entries: the last path segment
fn collection_key(path: &str) -> &str {
    let path = path.split('?').next().unwrap_or(path);
    path.trim_end_matches('/').rsplit('/').next().unwrap_or(path)
}

/// Whether paging stops after a page of `count` entries
///
/// Stops on an empty page, once `total` entries are collected, or, without
/// a `total` header, on a page shorter than [`PER_PAGE`].
fn is_last_page(count: usize, collected: usize, total: Option<usize>) -> bool {
    if count == 0 {
        return true;
    }
    match total {
        Some(total) => collected >= total,
        None => count < PER_PAGE,
    }
}

/// Linear backoff before retry number `attempt` (1-based)
fn backoff(base: Duration, attempt: u32) -> Duration {
    base * attempt
}

/// Append pagination parameters to a collection URL
fn page_url(url: &str, page: usize) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}per_page={}&page={}", url, separator, PER_PAGE, page)
}
