//! SerpApi Google search provider

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use uchat_config::SearchConfig;

use super::{OrganicResult, SearchProvider, SearchResults, http_client, read_json};
use crate::error::Result;

const DEFAULT_BASE_URL: &str = "https://serpapi.com";

pub struct SerpApiProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    hl: String,
    gl: String,
}

impl SerpApiProvider {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .as_ref()
            .map_or(DEFAULT_BASE_URL, url::Url::as_str)
            .trim_end_matches('/')
            .to_owned();

        Ok(Self {
            client: http_client()?,
            base_url,
            api_key: config.api_key.clone(),
            hl: config.hl.clone(),
            gl: config.gl.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/search.json", self.base_url)
    }
}

#[derive(Deserialize)]
struct SerpResponse {
    #[serde(default)]
    answer_box: Option<SerpAnswerBox>,
    #[serde(default)]
    organic_results: Vec<SerpOrganic>,
    #[serde(default)]
    images_results: Vec<SerpImage>,
}

#[derive(Deserialize)]
struct SerpAnswerBox {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
}

#[derive(Deserialize)]
struct SerpOrganic {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

#[derive(Deserialize)]
struct SerpImage {
    #[serde(default)]
    original: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
}

impl From<SerpResponse> for SearchResults {
    fn from(response: SerpResponse) -> Self {
        let answer = response
            .answer_box
            .and_then(|answer_box| answer_box.answer.or(answer_box.snippet));

        let organic = response
            .organic_results
            .into_iter()
            .map(|r| OrganicResult {
                title: r.title,
                snippet: r.snippet,
                link: r.link,
            })
            .collect();

        Self { answer, organic }
    }
}

#[async_trait]
impl SearchProvider for SerpApiProvider {
    fn name(&self) -> &'static str {
        "serpapi"
    }

    async fn search(&self, query: &str, num: u32) -> Result<SearchResults> {
        tracing::debug!(query, num, "serpapi search");

        let response = self
            .client
            .get(self.endpoint())
            .query(&[
                ("q", query),
                ("hl", self.hl.as_str()),
                ("gl", self.gl.as_str()),
                ("num", num.to_string().as_str()),
                ("api_key", self.api_key.expose_secret()),
            ])
            .send()
            .await?;

        let body: SerpResponse = read_json(self.name(), response).await?;
        let mut results = SearchResults::from(body);
        results.organic.truncate(num as usize);

        Ok(results)
    }

    async fn image_search(&self, query: &str) -> Result<Vec<String>> {
        tracing::debug!(query, "serpapi image search");

        let response = self
            .client
            .get(self.endpoint())
            .query(&[
                ("engine", "google_images"),
                ("q", query),
                ("hl", self.hl.as_str()),
                ("gl", self.gl.as_str()),
                ("api_key", self.api_key.expose_secret()),
            ])
            .send()
            .await?;

        let body: SerpResponse = read_json(self.name(), response).await?;

        Ok(body
            .images_results
            .into_iter()
            .filter_map(|image| image.original.or(image.thumbnail))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_box_answer_preferred_over_its_snippet() {
        let raw = r#"{
            "answer_box": {"answer": "31°C", "snippet": "Sunny and warm"},
            "organic_results": [{"title": "Weather", "snippet": "x", "link": "https://w.example"}]
        }"#;

        let results = SearchResults::from(serde_json::from_str::<SerpResponse>(raw).unwrap());
        assert_eq!(results.answer.as_deref(), Some("31°C"));
        assert_eq!(results.organic.len(), 1);
        assert_eq!(results.organic[0].link.as_deref(), Some("https://w.example"));
    }

    #[test]
    fn answer_box_snippet_used_without_answer() {
        let raw = r#"{"answer_box": {"snippet": "Petrol is ₹94.72 per litre"}}"#;
        let results = SearchResults::from(serde_json::from_str::<SerpResponse>(raw).unwrap());
        assert_eq!(results.answer.as_deref(), Some("Petrol is ₹94.72 per litre"));
        assert!(results.organic.is_empty());
    }

    #[test]
    fn empty_response_is_tolerated() {
        let results = SearchResults::from(serde_json::from_str::<SerpResponse>("{}").unwrap());
        assert_eq!(results, SearchResults::default());
    }
}
