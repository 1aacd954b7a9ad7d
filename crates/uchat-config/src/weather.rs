use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Structured current-weather provider
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeatherConfig {
    #[serde(rename = "type", default)]
    pub provider_type: WeatherProviderType,
    pub api_key: SecretString,
    #[serde(default)]
    pub base_url: Option<Url>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherProviderType {
    #[default]
    Openweather,
}
