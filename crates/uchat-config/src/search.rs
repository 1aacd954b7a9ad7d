use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Web and image search provider
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    #[serde(rename = "type", default)]
    pub provider_type: SearchProviderType,
    pub api_key: SecretString,
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Interface language
    #[serde(default = "default_hl")]
    pub hl: String,
    /// Country bias
    #[serde(default = "default_gl")]
    pub gl: String,
    /// Organic results requested per query
    #[serde(default = "default_num")]
    pub num: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchProviderType {
    #[default]
    Serpapi,
}

fn default_hl() -> String {
    "en".to_owned()
}

fn default_gl() -> String {
    "in".to_owned()
}

const fn default_num() -> u32 {
    5
}
