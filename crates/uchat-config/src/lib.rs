#![allow(clippy::must_use_candidate)]

pub mod cors;
mod duration;
mod env;
pub mod health;
pub mod images;
pub mod llm;
mod loader;
pub mod realtime;
pub mod search;
pub mod server;
pub mod storage;
pub mod telemetry;
pub mod transcription;
pub mod uploads;
pub mod weather;

use serde::Deserialize;

pub use cors::*;
pub use duration::HumanDuration;
pub use health::*;
pub use images::*;
pub use llm::*;
pub use realtime::*;
pub use search::*;
pub use server::*;
pub use storage::*;
pub use telemetry::*;
pub use transcription::*;
pub use uploads::*;
pub use weather::*;

/// Top-level uchat configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP listener configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Chat model upstream
    #[serde(default)]
    pub llm: LlmConfig,
    /// Search provider; realtime search lookups and image search are off without it
    #[serde(default)]
    pub search: Option<SearchConfig>,
    /// Structured weather provider
    #[serde(default)]
    pub weather: Option<WeatherConfig>,
    /// Realtime prompt enrichment
    #[serde(default)]
    pub realtime: RealtimeConfig,
    /// Image fetching for image requests
    #[serde(default)]
    pub images: ImagesConfig,
    /// Upload storage and extraction
    #[serde(default)]
    pub uploads: UploadsConfig,
    /// Speech-to-text provider
    #[serde(default)]
    pub transcription: Option<TranscriptionConfig>,
    /// Conversation store
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
