use std::{fmt::Write, future::Future, sync::Arc, time::Duration};

use futures_util::future::join_all;
use indexmap::IndexSet;
use serde::Serialize;
use uchat_config::Config;

use crate::{
    cache::LookupCache,
    category::{Category, CategorySpec, Extract, Lookup, QueryRule},
    classifier::IntentClassifier,
    error::{RealtimeError, Result},
    provider::{
        SearchProvider, SearchResults, WeatherProvider, WeatherReport, openweather::OpenWeatherProvider,
        serpapi::SerpApiProvider,
    },
    query::{build_query, extract_location},
    snippet::Snippet,
};

/// Organic results requested by the REST endpoints
const ENDPOINT_RESULTS: u32 = 10;
const WEATHER_FALLBACK_RESULTS: u32 = 3;

/// Weather lookup outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WeatherLookup {
    Structured(WeatherReport),
    Summary {
        city: String,
        query: String,
        summary: Option<String>,
    },
}

/// Realtime lookups shared by the chat pipeline and the REST endpoints
pub struct RealtimeService {
    enabled: bool,
    classifier: IntentClassifier,
    search: Option<Arc<dyn SearchProvider>>,
    weather: Option<Arc<dyn WeatherProvider>>,
    cache: LookupCache,
    fallback_location: String,
    lookup_timeout: Duration,
    headline_count: usize,
    results_per_query: u32,
}

/// Builder for [`RealtimeService`]
pub struct RealtimeServiceBuilder {
    service: RealtimeService,
}

impl RealtimeServiceBuilder {
    pub fn new(config: &Config) -> Self {
        let realtime = &config.realtime;

        Self {
            service: RealtimeService {
                enabled: realtime.enabled,
                classifier: IntentClassifier::new(realtime.match_mode),
                search: None,
                weather: None,
                cache: LookupCache::new(realtime.cache_ttl.get()),
                fallback_location: realtime.fallback_location.clone(),
                lookup_timeout: realtime.lookup_timeout.get(),
                headline_count: realtime.headline_count,
                results_per_query: config.search.as_ref().map_or(5, |s| s.num),
            },
        }
    }

    /// Create the providers named in configuration
    pub fn with_configured_providers(mut self, config: &Config) -> Result<Self> {
        if let Some(search) = &config.search {
            self.service.search = Some(Arc::new(SerpApiProvider::new(search)?));
        }
        if let Some(weather) = &config.weather {
            self.service.weather = Some(Arc::new(OpenWeatherProvider::new(weather)?));
        }
        Ok(self)
    }

    #[must_use]
    pub fn search_provider(mut self, provider: Arc<dyn SearchProvider>) -> Self {
        self.service.search = Some(provider);
        self
    }

    #[must_use]
    pub fn weather_provider(mut self, provider: Arc<dyn WeatherProvider>) -> Self {
        self.service.weather = Some(provider);
        self
    }

    pub fn build(self) -> RealtimeService {
        let service = self.service;

        tracing::debug!(
            enabled = service.enabled,
            search = ?service.search.as_ref().map(|p| p.name()),
            weather = ?service.weather.as_ref().map(|p| p.name()),
            "realtime service initialized"
        );

        service
    }
}

impl RealtimeService {
    /// Categories a message asks about
    pub fn classify(&self, utterance: &str) -> Vec<Category> {
        self.classifier.classify(utterance)
    }

    /// Snippets for every category the message matches
    ///
    /// Lookups run concurrently, each under its own deadline. A failed or
    /// empty lookup contributes nothing. Output follows category order.
    pub async fn snippets(&self, utterance: &str) -> Vec<Snippet> {
        if !self.enabled {
            return Vec::new();
        }

        let categories = self.classify(utterance);
        if categories.is_empty() {
            return Vec::new();
        }

        let location = extract_location(utterance).unwrap_or_else(|| self.fallback_location.clone());
        tracing::debug!(?categories, location = %location, "fetching realtime data");

        let lookups = categories.into_iter().map(|category| {
            let location = location.as_str();
            async move {
                let outcome = self
                    .with_deadline(self.lookup_text(category.spec(), utterance, location))
                    .await;

                match outcome {
                    Ok(Some(text)) => Some(Snippet::new(category, text)),
                    Ok(None) => {
                        tracing::debug!(?category, "realtime lookup returned nothing");
                        None
                    }
                    Err(error) => {
                        tracing::warn!(?category, error = %error, "realtime lookup failed");
                        None
                    }
                }
            }
        });

        join_all(lookups).await.into_iter().flatten().collect()
    }

    async fn with_deadline<T>(&self, lookup: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::time::timeout(self.lookup_timeout, lookup)
            .await
            .map_err(|_| RealtimeError::Timeout(self.lookup_timeout))?
    }

    async fn lookup_text(&self, spec: &CategorySpec, utterance: &str, location: &str) -> Result<Option<String>> {
        match spec.lookup {
            Lookup::Weather => Ok(weather_text(&self.weather(location).await?)),
            Lookup::Search { query, extract } => {
                let search_query = build_query(query, utterance, location);
                let results = self.search(&search_query, self.results_per_query).await?;

                Ok(match extract {
                    Extract::Headlines => {
                        let headlines = results.headlines(self.headline_count);
                        (!headlines.is_empty()).then(|| format!("Top headlines: {}", headlines.join(" | ")))
                    }
                    Extract::Answer => results.best_answer().map(|answer| match query {
                        QueryRule::Located { .. } => format!("for {location}: {answer}"),
                        QueryRule::Stripped { .. } => answer.to_owned(),
                    }),
                })
            }
        }
    }

    /// Web search through the cache
    pub async fn search(&self, query: &str, num: u32) -> Result<SearchResults> {
        if let Some(hit) = self.cache.search(query, num) {
            tracing::debug!(query, "search cache hit");
            return Ok(hit);
        }

        let provider = self.search.as_ref().ok_or(RealtimeError::NotConfigured("search"))?;
        let results = provider.search(query, num).await?;
        self.cache.store_search(query, num, results.clone());

        Ok(results)
    }

    /// Current weather, falling back to a search summary
    ///
    /// The structured provider is tried first. Without it, or when it fails
    /// or reports no temperature, the search provider summarizes instead.
    pub async fn weather(&self, city: &str) -> Result<WeatherLookup> {
        if let Some(report) = self.structured_weather(city).await {
            return Ok(WeatherLookup::Structured(report));
        }

        let query = format!("weather in {city} today");
        let results = self.search(&query, WEATHER_FALLBACK_RESULTS).await.map_err(|e| match e {
            RealtimeError::NotConfigured(_) if self.weather.is_none() => RealtimeError::NotConfigured("weather"),
            other => other,
        })?;

        Ok(WeatherLookup::Summary {
            city: city.to_owned(),
            query,
            summary: results.best_answer().map(str::to_owned),
        })
    }

    async fn structured_weather(&self, city: &str) -> Option<WeatherReport> {
        if let Some(hit) = self.cache.weather(city) {
            return Some(hit);
        }

        let provider = self.weather.as_ref()?;
        match provider.current(city).await {
            Ok(report) if report.temp_c.is_some() => {
                self.cache.store_weather(city, report.clone());
                Some(report)
            }
            Ok(_) => {
                tracing::debug!(city, "weather provider reported no temperature");
                None
            }
            Err(error) => {
                tracing::warn!(city, error = %error, "weather provider failed, using search fallback");
                None
            }
        }
    }

    /// Up to `max` distinct image URLs for a query
    pub async fn image_urls(&self, query: &str, max: usize) -> Result<Vec<String>> {
        let provider = self.search.as_ref().ok_or(RealtimeError::NotConfigured("search"))?;
        let urls = self.with_deadline(provider.image_search(query)).await?;

        Ok(urls
            .into_iter()
            .filter(|url| !url.trim().is_empty())
            .collect::<IndexSet<_>>()
            .into_iter()
            .take(max)
            .collect())
    }

    /// `GET /news` query composition
    pub fn news_query(q: &str, category: &str) -> String {
        match (category.trim(), q.trim()) {
            ("", "") => "latest news".to_owned(),
            (category, "") => format!("{category} news"),
            ("", q) => q.to_owned(),
            (category, q) => format!("{category} news {q}"),
        }
    }

    pub const fn endpoint_results() -> u32 {
        ENDPOINT_RESULTS
    }

    pub fn fallback_location(&self) -> &str {
        &self.fallback_location
    }
}

/// Render a weather lookup as one snippet line
fn weather_text(lookup: &WeatherLookup) -> Option<String> {
    match lookup {
        WeatherLookup::Structured(report) => {
            let temp = report.temp_c?;
            let mut text = format!("Weather in {}: {temp}°C", report.city);

            if let Some(description) = &report.description {
                text.push_str(", ");
                text.push_str(description);
            }
            if let Some(humidity) = report.humidity {
                let _ = write!(text, ", humidity {humidity}%");
            }
            if let Some(wind) = report.wind_m_s {
                let _ = write!(text, ", wind {wind} m/s");
            }

            Some(text)
        }
        WeatherLookup::Summary { city, summary, .. } => summary
            .as_ref()
            .map(|summary| format!("Weather summary for {city}: {summary}")),
    }
}
