//! Text extraction per file kind

mod document;
mod ocr;
mod video;

pub(crate) use document::{extract_docx, extract_pdf, extract_plain_text};
pub(crate) use ocr::run_ocr;
pub(crate) use video::extract_audio_track;

use std::{ffi::OsStr, time::Duration};

/// Run an external command and return its stdout
///
/// A non-zero exit becomes an error carrying stderr. The child is killed
/// when it outlives `timeout`.
async fn run_command(program: &str, args: &[&OsStr], timeout: Duration) -> Result<Vec<u8>, String> {
    let output = tokio::process::Command::new(program)
        .args(args)
        .kill_on_drop(true)
        .output();

    let output = tokio::time::timeout(timeout, output)
        .await
        .map_err(|_| format!("{program} timed out after {}s", timeout.as_secs_f32()))?
        .map_err(|e| format!("failed to run {program}: {e}"))?;

    if output.status.success() {
        Ok(output.stdout)
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(format!("{program} exited with {}: {}", output.status, stderr.trim()))
    }
}
