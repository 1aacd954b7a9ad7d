use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Speech-to-text provider used for audio uploads and `/transcribe-audio`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranscriptionConfig {
    #[serde(rename = "type", default)]
    pub provider_type: TranscriptionProviderType,
    pub api_key: SecretString,
    #[serde(default)]
    pub base_url: Option<Url>,
    #[serde(default = "default_model")]
    pub model: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptionProviderType {
    #[default]
    Whisper,
}

fn default_model() -> String {
    "whisper-1".to_owned()
}
