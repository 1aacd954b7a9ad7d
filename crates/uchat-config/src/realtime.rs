use serde::Deserialize;

use crate::duration::HumanDuration;

/// Realtime enrichment of chat prompts
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RealtimeConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Location used when the message names none
    #[serde(default = "default_fallback_location")]
    pub fallback_location: String,
    #[serde(default)]
    pub match_mode: MatchMode,
    /// Per-lookup deadline
    #[serde(default = "default_lookup_timeout")]
    pub lookup_timeout: HumanDuration,
    /// Headlines joined into a single snippet
    #[serde(default = "default_headline_count")]
    pub headline_count: usize,
    /// Lifetime of cached lookup results; zero disables caching
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: HumanDuration,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            fallback_location: default_fallback_location(),
            match_mode: MatchMode::default(),
            lookup_timeout: default_lookup_timeout(),
            headline_count: default_headline_count(),
            cache_ttl: default_cache_ttl(),
        }
    }
}

/// How category keywords are matched against a message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Keywords must sit on word boundaries
    #[default]
    Word,
    /// Any case-insensitive occurrence counts
    Substring,
}

const fn default_enabled() -> bool {
    true
}

fn default_fallback_location() -> String {
    "India".to_owned()
}

const fn default_lookup_timeout() -> HumanDuration {
    HumanDuration::from_secs(8)
}

const fn default_headline_count() -> usize {
    3
}

const fn default_cache_ttl() -> HumanDuration {
    HumanDuration::from_secs(60)
}
