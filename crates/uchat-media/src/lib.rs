//! Upload pipeline
//!
//! Stores uploaded files, extracts text from documents, images, audio and
//! video, and serves stored files back.

#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod extract;
mod kind;
mod object_store;
mod router;
mod service;
mod transcriber;

use std::sync::Arc;

use uchat_store::ChatStore;

pub use error::{MediaError, Result};
pub use kind::FileKind;
pub use object_store::{LocalObjectStore, StoredObject};
pub use router::endpoint_router;
pub use service::{MediaService, UploadOutcome};
pub use transcriber::{AudioClip, Transcriber, WhisperTranscriber};

/// Build the media service from configuration
///
/// # Errors
///
/// Returns an error if the transcription provider cannot be created
pub fn build_service(config: &uchat_config::Config, store: Arc<dyn ChatStore>) -> anyhow::Result<Arc<MediaService>> {
    let mut service = MediaService::new(&config.uploads, store);

    if let Some(transcription) = &config.transcription {
        let whisper = WhisperTranscriber::new(transcription)
            .map_err(|e| anyhow::anyhow!("failed to initialize transcription provider: {e}"))?;
        service = service.with_transcriber(Arc::new(whisper));
    } else {
        tracing::debug!("no transcription provider configured, audio and video uploads will not be transcribed");
    }

    Ok(Arc::new(service))
}
