use std::{path::Path, sync::Arc, time::Duration};

use serde::Serialize;
use uchat_config::UploadsConfig;
use uchat_core::Timestamp;
use uchat_store::{ChatStore, FileRecord};
use uuid::Uuid;

use crate::{
    error::{MediaError, Result},
    extract,
    kind::{AUDIO_EXTENSIONS, FileKind, extension_of},
    object_store::LocalObjectStore,
    transcriber::{AudioClip, Transcriber},
};

/// Response of `/upload-file`
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub file_id: String,
    pub original_name: String,
    /// Extracted text, a bracketed failure note, or `None` for unknown kinds
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub estimated_tokens: usize,
    pub chunk_count: usize,
}

pub struct MediaService {
    objects: LocalObjectStore,
    transcriber: Option<Arc<dyn Transcriber>>,
    store: Arc<dyn ChatStore>,
    max_bytes: usize,
    chunk_tokens: usize,
    ocr_command: String,
    ffmpeg_command: String,
    extract_timeout: Duration,
}

impl MediaService {
    pub fn new(config: &UploadsConfig, store: Arc<dyn ChatStore>) -> Self {
        Self {
            objects: LocalObjectStore::new(&config.directory, &config.public_base_url),
            transcriber: None,
            store,
            max_bytes: config.max_bytes,
            chunk_tokens: config.chunk_tokens,
            ocr_command: config.ocr_command.clone(),
            ffmpeg_command: config.ffmpeg_command.clone(),
            extract_timeout: config.extract_timeout.get(),
        }
    }

    #[must_use]
    pub fn with_transcriber(mut self, transcriber: Arc<dyn Transcriber>) -> Self {
        self.transcriber = Some(transcriber);
        self
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub fn objects(&self) -> &LocalObjectStore {
        &self.objects
    }

    /// Store an upload and extract its text
    ///
    /// Extraction failures do not fail the upload; they are returned as a
    /// bracketed note in `text`.
    pub async fn upload(&self, original_name: &str, bytes: &[u8]) -> Result<UploadOutcome> {
        if bytes.len() > self.max_bytes {
            return Err(MediaError::PayloadTooLarge(self.max_bytes));
        }

        let kind = FileKind::from_file_name(original_name);
        let file_id = match extension_of(original_name) {
            Some(extension) => format!("{}.{extension}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };

        let stored = self.objects.put(&file_id, bytes).await?;

        let text = if kind == FileKind::Other {
            None
        } else {
            let text = match self.extract(kind, &stored.path, original_name).await {
                Ok(text) => text,
                Err(error) => {
                    tracing::warn!(%file_id, ?kind, %error, "text extraction failed");
                    format!("[{}: {error}]", kind.failure_label())
                }
            };
            Some(text)
        };

        let (estimated_tokens, chunk_count) = text.as_deref().map_or((0, 0), |text| {
            let chunks = uchat_prompt::split_into_chunks(text, self.chunk_tokens);
            (uchat_prompt::estimate_tokens(text), chunks.len())
        });

        self.store
            .record_file(FileRecord {
                file_id: file_id.clone(),
                original_name: original_name.to_owned(),
                content_type: Some(mime_guess::from_path(original_name).first_or_octet_stream().to_string()),
                extracted_chars: text.as_deref().map_or(0, |text| text.chars().count()),
                uploaded_at: Timestamp::now(),
            })
            .await?;

        tracing::info!(%file_id, ?kind, size = bytes.len(), estimated_tokens, "file uploaded");

        Ok(UploadOutcome {
            image_url: (kind == FileKind::Image).then_some(stored.url),
            file_id,
            original_name: original_name.to_owned(),
            text,
            estimated_tokens,
            chunk_count,
        })
    }

    /// Transcribe a standalone audio upload without storing the audio
    pub async fn transcribe_upload(&self, original_name: &str, bytes: Vec<u8>) -> Result<String> {
        let supported = extension_of(original_name).is_some_and(|ext| AUDIO_EXTENSIONS.contains(&ext.as_str()));
        if !supported {
            return Err(MediaError::InvalidRequest(format!(
                "Unsupported audio format. Supported formats: {}",
                AUDIO_EXTENSIONS.join(", ")
            )));
        }

        let text = self.transcribe(AudioClip::new(bytes, original_name)).await?;

        self.store
            .record_file(FileRecord {
                file_id: Uuid::new_v4().to_string(),
                original_name: original_name.to_owned(),
                content_type: Some(mime_guess::from_path(original_name).first_or_octet_stream().to_string()),
                extracted_chars: text.chars().count(),
                uploaded_at: Timestamp::now(),
            })
            .await?;

        Ok(text)
    }

    pub async fn read_file(&self, file_name: &str) -> Result<Vec<u8>> {
        self.objects.get(file_name).await
    }

    async fn transcribe(&self, clip: AudioClip) -> Result<String> {
        let transcriber = self
            .transcriber
            .as_ref()
            .ok_or(MediaError::NotConfigured("transcription"))?;

        tracing::debug!(provider = transcriber.name(), file = %clip.file_name, "transcribing audio");
        transcriber.transcribe(clip).await
    }

    async fn extract(&self, kind: FileKind, path: &Path, original_name: &str) -> Result<String> {
        match kind {
            FileKind::Text => extract::extract_plain_text(path).await,
            FileKind::Pdf => extract::extract_pdf(path).await,
            FileKind::Docx => extract::extract_docx(path).await,
            FileKind::Image => extract::run_ocr(&self.ocr_command, path, self.extract_timeout).await,
            FileKind::Audio => {
                let bytes = tokio::fs::read(path).await?;
                self.transcribe(AudioClip::new(bytes, original_name)).await
            }
            FileKind::Video => {
                let wav = extract::extract_audio_track(&self.ffmpeg_command, path, self.extract_timeout).await?;
                let bytes = tokio::fs::read(&wav).await?;
                self.transcribe(AudioClip::new(bytes, "audio.wav")).await
            }
            FileKind::Other => Err(MediaError::Extraction("unsupported file type".to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use uchat_store::MemoryStore;

    use super::*;

    struct FakeTranscriber {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Transcriber for FakeTranscriber {
        fn name(&self) -> &str {
            "fake"
        }

        async fn transcribe(&self, clip: AudioClip) -> Result<String> {
            self.seen.lock().unwrap().push(clip.content_type);
            Ok(format!("{} bytes of speech", clip.bytes.len()))
        }
    }

    fn service(dir: &Path, store: Arc<MemoryStore>) -> MediaService {
        let config = UploadsConfig {
            directory: dir.to_path_buf(),
            max_bytes: 64,
            chunk_tokens: 2,
            ocr_command: "uchat-no-such-ocr-binary".to_owned(),
            ffmpeg_command: "uchat-no-such-ffmpeg".to_owned(),
            ..UploadsConfig::default()
        };
        MediaService::new(&config, store)
    }

    #[tokio::test]
    async fn text_upload_reports_tokens_and_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::new());
        let service = service(dir.path(), store.clone());

        let outcome = service.upload("notes.txt", b"first line\nsecond line").await.unwrap();

        assert!(outcome.file_id.ends_with(".txt"));
        assert_eq!(outcome.text.as_deref(), Some("first line\nsecond line"));
        assert_eq!(outcome.estimated_tokens, 5);
        assert_eq!(outcome.chunk_count, 2);
        assert!(outcome.image_url.is_none());
        assert!(dir.path().join(&outcome.file_id).exists());
        assert_eq!(store.file(&outcome.file_id).unwrap().original_name, "notes.txt");
    }

    #[tokio::test]
    async fn image_upload_returns_url_and_ocr_note() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path(), Arc::new(MemoryStore::new()));

        let outcome = service.upload("scan.png", b"\x89PNG").await.unwrap();

        let url = outcome.image_url.unwrap();
        assert!(url.starts_with("http://127.0.0.1:8000/files/"));
        assert!(url.ends_with(".png"));
        assert!(outcome.text.unwrap().starts_with("[OCR error: failed to run uchat-no-such-ocr-binary"));
    }

    #[tokio::test]
    async fn audio_without_provider_gets_transcription_note() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path(), Arc::new(MemoryStore::new()));

        let outcome = service.upload("memo.mp3", b"ID3").await.unwrap();
        assert_eq!(
            outcome.text.as_deref(),
            Some("[Transcription error: transcription provider is not configured]")
        );
    }

    #[tokio::test]
    async fn audio_upload_is_transcribed() {
        let dir = tempfile::tempdir().unwrap();
        let transcriber = Arc::new(FakeTranscriber {
            seen: Mutex::new(Vec::new()),
        });
        let service = service(dir.path(), Arc::new(MemoryStore::new())).with_transcriber(transcriber.clone());

        let outcome = service.upload("memo.mp3", b"ID3data").await.unwrap();

        assert_eq!(outcome.text.as_deref(), Some("7 bytes of speech"));
        assert_eq!(transcriber.seen.lock().unwrap().as_slice(), ["audio/mpeg"]);
    }

    #[tokio::test]
    async fn video_failure_uses_video_note() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path(), Arc::new(MemoryStore::new()));

        let outcome = service.upload("clip.mp4", b"....").await.unwrap();
        assert!(outcome.text.unwrap().starts_with("[Video transcription error: ffmpeg error:"));
    }

    #[tokio::test]
    async fn unknown_kind_has_no_text() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path(), Arc::new(MemoryStore::new()));

        let outcome = service.upload("archive.7z", b"7z").await.unwrap();
        assert!(outcome.text.is_none());
        assert_eq!(outcome.estimated_tokens, 0);
        assert_eq!(outcome.chunk_count, 0);
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path(), Arc::new(MemoryStore::new()));

        let err = service.upload("big.txt", &[b'a'; 65]).await.unwrap_err();
        assert!(matches!(err, MediaError::PayloadTooLarge(64)));
    }

    #[tokio::test]
    async fn transcribe_upload_checks_format() {
        let dir = tempfile::tempdir().unwrap();
        let transcriber = Arc::new(FakeTranscriber {
            seen: Mutex::new(Vec::new()),
        });
        let service = service(dir.path(), Arc::new(MemoryStore::new())).with_transcriber(transcriber);

        let err = service.transcribe_upload("memo.flac", vec![1]).await.unwrap_err();
        assert!(matches!(err, MediaError::InvalidRequest(_)));

        let text = service.transcribe_upload("memo.WAV", vec![1, 2]).await.unwrap();
        assert_eq!(text, "2 bytes of speech");
    }
}
