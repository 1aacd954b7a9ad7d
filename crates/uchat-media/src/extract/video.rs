use std::{ffi::OsStr, path::Path, time::Duration};

use tempfile::TempPath;

use crate::error::{MediaError, Result};

/// Decode the audio track of a video into a 16 kHz mono WAV file
///
/// The file is removed when the returned path is dropped.
pub(crate) async fn extract_audio_track(ffmpeg: &str, video: &Path, timeout: Duration) -> Result<TempPath> {
    let wav = tempfile::Builder::new()
        .prefix("uchat-audio-")
        .suffix(".wav")
        .tempfile()?
        .into_temp_path();

    let args = [
        OsStr::new("-i"),
        video.as_os_str(),
        OsStr::new("-vn"),
        OsStr::new("-acodec"),
        OsStr::new("pcm_s16le"),
        OsStr::new("-ar"),
        OsStr::new("16000"),
        OsStr::new("-ac"),
        OsStr::new("1"),
        OsStr::new("-y"),
        OsStr::new("-loglevel"),
        OsStr::new("error"),
        wav.as_os_str(),
    ];

    super::run_command(ffmpeg, &args, timeout)
        .await
        .map_err(|e| MediaError::Extraction(format!("ffmpeg error: {e}")))?;

    Ok(wav)
}
