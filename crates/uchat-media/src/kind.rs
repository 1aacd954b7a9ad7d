use std::path::Path;

use serde::Serialize;

/// Audio formats accepted by transcription
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "ogg", "webm"];

const DOCUMENT_EXTENSIONS: &[&str] = &["txt", "pdf", "docx"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "webp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm"];

/// How text is pulled out of an upload, decided by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Text,
    Pdf,
    Docx,
    Image,
    Audio,
    Video,
    Other,
}

impl FileKind {
    /// Classify by lower-cased extension
    ///
    /// `webm` is treated as audio since that list is checked first.
    pub fn from_extension(extension: &str) -> Self {
        let extension = extension.to_ascii_lowercase();
        let extension = extension.as_str();

        if DOCUMENT_EXTENSIONS.contains(&extension) {
            match extension {
                "pdf" => Self::Pdf,
                "docx" => Self::Docx,
                _ => Self::Text,
            }
        } else if AUDIO_EXTENSIONS.contains(&extension) {
            Self::Audio
        } else if IMAGE_EXTENSIONS.contains(&extension) {
            Self::Image
        } else if VIDEO_EXTENSIONS.contains(&extension) {
            Self::Video
        } else {
            Self::Other
        }
    }

    pub fn from_file_name(file_name: &str) -> Self {
        extension_of(file_name).as_deref().map_or(Self::Other, Self::from_extension)
    }

    /// Placeholder prefix used when extraction fails
    pub(crate) fn failure_label(self) -> &'static str {
        match self {
            Self::Audio => "Transcription error",
            Self::Image => "OCR error",
            Self::Video => "Video transcription error",
            Self::Text | Self::Pdf | Self::Docx | Self::Other => "Extraction error",
        }
    }
}

/// Lower-cased extension of a client supplied file name
pub fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(str::to_ascii_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_extension() {
        assert_eq!(FileKind::from_file_name("notes.TXT"), FileKind::Text);
        assert_eq!(FileKind::from_file_name("report.pdf"), FileKind::Pdf);
        assert_eq!(FileKind::from_file_name("cv.docx"), FileKind::Docx);
        assert_eq!(FileKind::from_file_name("scan.jpeg"), FileKind::Image);
        assert_eq!(FileKind::from_file_name("memo.m4a"), FileKind::Audio);
        assert_eq!(FileKind::from_file_name("clip.mkv"), FileKind::Video);
        assert_eq!(FileKind::from_file_name("archive.tar.gz"), FileKind::Other);
        assert_eq!(FileKind::from_file_name("README"), FileKind::Other);
    }

    #[test]
    fn webm_is_audio() {
        assert_eq!(FileKind::from_extension("webm"), FileKind::Audio);
    }

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(extension_of("Photo.PNG").as_deref(), Some("png"));
        assert_eq!(extension_of("no_extension"), None);
        assert_eq!(extension_of("trailing."), None);
    }
}
