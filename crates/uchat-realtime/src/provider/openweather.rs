//! OpenWeather current-conditions provider

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use uchat_config::WeatherConfig;

use super::{WeatherProvider, WeatherReport, http_client, read_json};
use crate::error::Result;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

pub struct OpenWeatherProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl OpenWeatherProvider {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
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
        })
    }
}

#[derive(Deserialize)]
struct OwmResponse {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    main: Option<OwmMain>,
    #[serde(default)]
    weather: Vec<OwmCondition>,
    #[serde(default)]
    wind: Option<OwmWind>,
}

#[derive(Deserialize)]
struct OwmMain {
    #[serde(default)]
    temp: Option<f64>,
    #[serde(default)]
    humidity: Option<f64>,
}

#[derive(Deserialize)]
struct OwmCondition {
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
struct OwmWind {
    #[serde(default)]
    speed: Option<f64>,
}

impl OwmResponse {
    fn into_report(self, requested_city: &str) -> WeatherReport {
        WeatherReport {
            city: self
                .name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| requested_city.to_owned()),
            temp_c: self.main.as_ref().and_then(|m| m.temp),
            description: self.weather.into_iter().next().and_then(|c| c.description),
            humidity: self.main.and_then(|m| m.humidity),
            wind_m_s: self.wind.and_then(|w| w.speed),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn name(&self) -> &'static str {
        "openweather"
    }

    async fn current(&self, city: &str) -> Result<WeatherReport> {
        tracing::debug!(city, "openweather lookup");

        let response = self
            .client
            .get(format!("{}/data/2.5/weather", self.base_url))
            .query(&[("q", city), ("appid", self.api_key.expose_secret()), ("units", "metric")])
            .send()
            .await?;

        let body: OwmResponse = read_json(self.name(), response).await?;

        Ok(body.into_report(city))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_response_maps_every_field() {
        let raw = r#"{
            "name": "Paris",
            "main": {"temp": 18.4, "humidity": 72},
            "weather": [{"description": "light rain"}],
            "wind": {"speed": 4.1}
        }"#;

        let report = serde_json::from_str::<OwmResponse>(raw).unwrap().into_report("paris");

        assert_eq!(
            report,
            WeatherReport {
                city: "Paris".to_owned(),
                temp_c: Some(18.4),
                description: Some("light rain".to_owned()),
                humidity: Some(72.0),
                wind_m_s: Some(4.1),
            }
        );
    }

    #[test]
    fn sparse_response_keeps_requested_city() {
        let report = serde_json::from_str::<OwmResponse>("{}").unwrap().into_report("Atlantis");
        assert_eq!(report.city, "Atlantis");
        assert_eq!(report.temp_c, None);
        assert_eq!(report.description, None);
    }
}
