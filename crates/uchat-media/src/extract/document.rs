use std::{
    io::{Cursor, Read},
    path::Path,
    sync::LazyLock,
};

use regex::Regex;

use crate::error::{MediaError, Result};

static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<w:p[ >].*?</w:p>").expect("paragraph pattern must compile"));

static TEXT_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>").expect("text run pattern must compile"));

/// Read a text file, replacing invalid UTF-8
pub(crate) async fn extract_plain_text(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path).await?;
    Ok(String::from_utf8_lossy(&bytes).trim().to_owned())
}

pub(crate) async fn extract_pdf(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path).await?;

    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| MediaError::Extraction(format!("PDF extraction task failed: {e}")))?
        .map_err(|e| MediaError::Extraction(format!("failed to read PDF file: {e}")))?;

    Ok(text.trim().to_owned())
}

pub(crate) async fn extract_docx(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path).await?;

    tokio::task::spawn_blocking(move || docx_text(&bytes))
        .await
        .map_err(|e| MediaError::Extraction(format!("DOCX extraction task failed: {e}")))?
}

/// Paragraph text of a DOCX package, one paragraph per line
pub(crate) fn docx_text(bytes: &[u8]) -> Result<String> {
    let invalid = |e: &dyn std::fmt::Display| MediaError::Extraction(format!("failed to read DOCX file: {e}"));

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| invalid(&e))?;
    let mut document = archive.by_name("word/document.xml").map_err(|e| invalid(&e))?;

    let mut xml = String::new();
    document.read_to_string(&mut xml).map_err(|e| invalid(&e))?;

    let paragraphs: Vec<String> = PARAGRAPH_RE
        .find_iter(&xml)
        .map(|paragraph| {
            TEXT_RUN_RE
                .captures_iter(paragraph.as_str())
                .filter_map(|run| run.get(1))
                .map(|text| unescape_xml(text.as_str()))
                .collect()
        })
        .collect();

    Ok(paragraphs.join("\n").trim().to_owned())
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
