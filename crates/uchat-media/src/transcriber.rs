use async_trait::async_trait;
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use uchat_config::TranscriptionConfig;

use crate::error::{MediaError, Result};

const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// Audio handed to a speech-to-text provider
#[derive(Debug)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

impl AudioClip {
    /// Clip with a content type guessed from the file name
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name).first_or_octet_stream().to_string();

        Self {
            bytes,
            file_name,
            content_type,
        }
    }
}

/// Speech-to-text provider
#[async_trait]
pub trait Transcriber: Send + Sync {
    fn name(&self) -> &str;

    async fn transcribe(&self, clip: AudioClip) -> Result<String>;
}

/// `OpenAI` Whisper transcription over multipart upload
pub struct WhisperTranscriber {
    client: Client,
    base_url: String,
    api_key: SecretString,
    model: String,
}

impl WhisperTranscriber {
    pub fn new(config: &TranscriptionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| MediaError::Transcription(format!("failed to build HTTP client: {e}")))?;

        let base_url = config
            .base_url
            .as_ref()
            .map_or(DEFAULT_OPENAI_API_URL, url::Url::as_str)
            .trim_end_matches('/')
            .to_owned();

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

#[derive(Deserialize)]
struct WhisperResponse {
    text: String,
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    fn name(&self) -> &str {
        "whisper"
    }

    async fn transcribe(&self, clip: AudioClip) -> Result<String> {
        let url = format!("{}/audio/transcriptions", self.base_url);

        tracing::debug!(size = clip.bytes.len(), model = %self.model, "whisper transcription request");

        let part = Part::bytes(clip.bytes)
            .file_name(clip.file_name)
            .mime_str(&clip.content_type)
            .map_err(|e| MediaError::InvalidRequest(format!("invalid content type: {e}")))?;

        let form = Form::new().part("file", part).text("model", self.model.clone());

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::Transcription(format!("failed to reach transcription provider: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, %body, "whisper request failed");
            return Err(MediaError::Transcription(format!(
                "transcription provider returned {status}"
            )));
        }

        let result: WhisperResponse = response
            .json()
            .await
            .map_err(|e| MediaError::Transcription(format!("invalid transcription response: {e}")))?;

        Ok(result.text.trim().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_guesses_content_type() {
        assert_eq!(AudioClip::new(Vec::new(), "memo.mp3").content_type, "audio/mpeg");
        assert_eq!(
            AudioClip::new(Vec::new(), "memo.unknownext").content_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn base_url_defaults_to_openai() {
        let config: TranscriptionConfig = toml::from_str("api_key = \"sk-test\"").unwrap();
        let whisper = WhisperTranscriber::new(&config).unwrap();
        assert_eq!(whisper.base_url, DEFAULT_OPENAI_API_URL);
        assert_eq!(whisper.model, "whisper-1");
    }
}
