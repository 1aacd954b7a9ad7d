//! Search and weather provider traits and implementations

pub mod openweather;
pub mod serpapi;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::error::{RealtimeError, Result};

/// One organic web result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganicResult {
    pub title: Option<String>,
    pub snippet: Option<String>,
    pub link: Option<String>,
}

/// Reduced web search response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    /// Direct answer, or the answer-box snippet when there is no answer
    pub answer: Option<String>,
    pub organic: Vec<OrganicResult>,
}

impl SearchResults {
    /// Direct answer, else the first organic snippet
    pub fn best_answer(&self) -> Option<&str> {
        self.answer
            .as_deref()
            .or_else(|| self.organic.iter().find_map(|r| r.snippet.as_deref()))
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// Titles of the first `count` organic results that have one
    pub fn headlines(&self, count: usize) -> Vec<&str> {
        self.organic
            .iter()
            .filter_map(|r| r.title.as_deref())
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .take(count)
            .collect()
    }
}

/// Current conditions for a city
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub city: String,
    pub temp_c: Option<f64>,
    pub description: Option<String>,
    pub humidity: Option<f64>,
    pub wind_m_s: Option<f64>,
}

/// Web and image search backend
#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Run a web search returning at most `num` organic results
    async fn search(&self, query: &str, num: u32) -> Result<SearchResults>;

    /// Image URLs for a query, in provider order
    async fn image_search(&self, query: &str) -> Result<Vec<String>>;
}

/// Structured weather backend
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn current(&self, city: &str) -> Result<WeatherReport>;
}

const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(15);

pub(crate) fn http_client() -> Result<Client> {
    Client::builder()
        .timeout(UPSTREAM_TIMEOUT)
        .build()
        .map_err(|e| RealtimeError::Upstream(format!("failed to build HTTP client: {e}")))
}

pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(provider: &str, response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(provider, status = %status, "provider returned error");
        return Err(RealtimeError::Upstream(format!("{provider} returned {status}: {body}")));
    }

    response
        .json()
        .await
        .map_err(|e| RealtimeError::Upstream(format!("failed to parse {provider} response: {e}")))
}
