use std::{ffi::OsStr, path::Path, time::Duration};

use crate::error::{MediaError, Result};

/// OCR an image with the tesseract CLI, reading text from stdout
pub(crate) async fn run_ocr(command: &str, path: &Path, timeout: Duration) -> Result<String> {
    let stdout = super::run_command(command, &[path.as_os_str(), OsStr::new("stdout")], timeout)
        .await
        .map_err(MediaError::Extraction)?;

    Ok(String::from_utf8_lossy(&stdout).trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_binary_is_an_extraction_error() {
        let err = run_ocr("uchat-no-such-ocr-binary", Path::new("scan.png"), Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::Extraction(ref message) if message.contains("uchat-no-such-ocr-binary")));
    }
}
