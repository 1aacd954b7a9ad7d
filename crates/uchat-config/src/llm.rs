use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Chat model upstream
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// Provider protocol type
    #[serde(rename = "type", default)]
    pub provider_type: LlmProviderType,
    /// Required; an empty key is rejected at load time
    #[serde(default)]
    pub api_key: Option<SecretString>,
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Model used when the request does not name one
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Models a request may select; empty allows any
    #[serde(default)]
    pub allowed_models: Vec<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Estimated token budget for the whole prompt before history is trimmed
    #[serde(default = "default_context_budget")]
    pub context_budget_tokens: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider_type: LlmProviderType::default(),
            api_key: None,
            base_url: None,
            default_model: default_model(),
            allowed_models: Vec::new(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            context_budget_tokens: default_context_budget(),
        }
    }
}

impl LlmConfig {
    /// Whether a caller-selected model may be used
    pub fn allows_model(&self, model: &str) -> bool {
        self.allowed_models.is_empty() || self.allowed_models.iter().any(|m| m == model)
    }
}

/// Supported model protocols
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProviderType {
    /// OpenAI-compatible chat completions
    #[default]
    Openai,
}

fn default_model() -> String {
    "gpt-4o-mini".to_owned()
}

const fn default_temperature() -> f32 {
    0.7
}

const fn default_max_tokens() -> u32 {
    1000
}

const fn default_context_budget() -> usize {
    12_000
}
