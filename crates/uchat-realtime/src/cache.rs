use std::time::Duration;

use mini_moka::sync::Cache;

use crate::provider::{SearchResults, WeatherReport};

const MAX_ENTRIES: u64 = 1_000;

/// Short-lived cache of provider responses keyed by normalized query
///
/// A zero TTL disables caching entirely.
pub struct LookupCache {
    searches: Option<Cache<String, SearchResults>>,
    weather: Option<Cache<String, WeatherReport>>,
}

impl LookupCache {
    pub fn new(ttl: Duration) -> Self {
        if ttl.is_zero() {
            return Self::disabled();
        }

        Self {
            searches: Some(Cache::builder().max_capacity(MAX_ENTRIES).time_to_live(ttl).build()),
            weather: Some(Cache::builder().max_capacity(MAX_ENTRIES).time_to_live(ttl).build()),
        }
    }

    pub const fn disabled() -> Self {
        Self {
            searches: None,
            weather: None,
        }
    }

    pub fn search(&self, query: &str, num: u32) -> Option<SearchResults> {
        self.searches.as_ref()?.get(&search_key(query, num))
    }

    pub fn store_search(&self, query: &str, num: u32, results: SearchResults) {
        if let Some(cache) = &self.searches {
            cache.insert(search_key(query, num), results);
        }
    }

    pub fn weather(&self, city: &str) -> Option<WeatherReport> {
        self.weather.as_ref()?.get(&normalize(city))
    }

    pub fn store_weather(&self, city: &str, report: WeatherReport) {
        if let Some(cache) = &self.weather {
            cache.insert(normalize(city), report);
        }
    }
}

fn search_key(query: &str, num: u32) -> String {
    format!("{num}:{}", normalize(query))
}

fn normalize(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}
