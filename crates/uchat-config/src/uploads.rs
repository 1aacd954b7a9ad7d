use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

use crate::duration::HumanDuration;

/// File upload handling and text extraction
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UploadsConfig {
    /// Where uploaded files are written
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// Base of the public URL returned for uploaded images
    #[serde(default = "default_public_base_url")]
    pub public_base_url: Url,
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
    /// Token budget for one extracted-text chunk
    #[serde(default = "default_chunk_tokens")]
    pub chunk_tokens: usize,
    #[serde(default = "default_ocr_command")]
    pub ocr_command: String,
    #[serde(default = "default_ffmpeg_command")]
    pub ffmpeg_command: String,
    /// Deadline for one OCR or ffmpeg run
    #[serde(default = "default_extract_timeout")]
    pub extract_timeout: HumanDuration,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            public_base_url: default_public_base_url(),
            max_bytes: default_max_bytes(),
            chunk_tokens: default_chunk_tokens(),
            ocr_command: default_ocr_command(),
            ffmpeg_command: default_ffmpeg_command(),
            extract_timeout: default_extract_timeout(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_public_base_url() -> Url {
    Url::parse("http://127.0.0.1:8000/files").expect("static url is valid")
}

const fn default_max_bytes() -> usize {
    25 << 20
}

const fn default_chunk_tokens() -> usize {
    1000
}

fn default_ocr_command() -> String {
    "tesseract".to_owned()
}

fn default_ffmpeg_command() -> String {
    "ffmpeg".to_owned()
}

const fn default_extract_timeout() -> HumanDuration {
    HumanDuration::from_secs(120)
}
