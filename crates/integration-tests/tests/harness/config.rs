//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use secrecy::SecretString;
use uchat_config::{
    Config, HealthConfig, SearchConfig, SearchProviderType, ServerConfig, TranscriptionConfig,
    TranscriptionProviderType, WeatherConfig, WeatherProviderType,
};
use url::Url;

fn parse_url(raw: &str) -> Url {
    raw.parse().expect("mock base URL is valid")
}

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder wired to a mock model at `llm_base_url`
    pub fn new(llm_base_url: &str) -> Self {
        let mut config = Config {
            server: ServerConfig {
                listen_address: SocketAddr::from(([127, 0, 0, 1], 0)),
                health: HealthConfig {
                    enabled: true,
                    ..HealthConfig::default()
                },
                ..ServerConfig::default()
            },
            ..Config::default()
        };

        config.llm.api_key = Some(SecretString::from("test-key"));
        config.llm.base_url = Some(parse_url(llm_base_url));

        Self { config }
    }

    /// Use a mock SerpApi backend for search and images
    pub fn with_search(mut self, base_url: &str) -> Self {
        self.config.search = Some(SearchConfig {
            provider_type: SearchProviderType::Serpapi,
            api_key: SecretString::from("serp-test-key"),
            base_url: Some(parse_url(base_url)),
            hl: "en".to_owned(),
            gl: "in".to_owned(),
            num: 5,
        });
        self
    }

    /// Use a mock OpenWeather backend
    pub fn with_weather(mut self, base_url: &str) -> Self {
        self.config.weather = Some(WeatherConfig {
            provider_type: WeatherProviderType::Openweather,
            api_key: SecretString::from("owm-test-key"),
            base_url: Some(parse_url(base_url)),
        });
        self
    }

    /// Use a mock Whisper backend
    pub fn with_transcription(mut self, base_url: &str) -> Self {
        self.config.transcription = Some(TranscriptionConfig {
            provider_type: TranscriptionProviderType::Whisper,
            api_key: SecretString::from("whisper-test-key"),
            base_url: Some(parse_url(base_url)),
            model: "whisper-1".to_owned(),
        });
        self
    }

    /// Restrict the models a caller may select
    pub fn with_allowed_models(mut self, models: &[&str]) -> Self {
        self.config.llm.allowed_models = models.iter().map(|&m| m.to_owned()).collect();
        self
    }

    /// Limit for JSON request bodies
    pub fn with_max_body_bytes(mut self, bytes: usize) -> Self {
        self.config.server.max_body_bytes = bytes;
        self
    }

    /// Limit for a single uploaded file
    pub fn with_upload_limit(mut self, bytes: usize) -> Self {
        self.config.uploads.max_bytes = bytes;
        self
    }

    /// Turn realtime prompt enrichment off
    pub fn without_realtime(mut self) -> Self {
        self.config.realtime.enabled = false;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
