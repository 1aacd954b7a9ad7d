use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, Path, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use http::StatusCode;
use serde::Serialize;

use crate::{
    error::{MediaError, Result},
    service::{MediaService, UploadOutcome},
};

/// Room for multipart boundaries and headers on top of the file limit
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Routes for uploads, stored files and audio transcription
///
/// `max_bytes` bounds a single uploaded file; the request body limit is
/// raised accordingly for the multipart routes.
pub fn endpoint_router(max_bytes: usize) -> Router<Arc<MediaService>> {
    let body_limit = || DefaultBodyLimit::max(max_bytes.saturating_add(MULTIPART_OVERHEAD));

    Router::new()
        .route("/upload-file", post(upload_file).layer(body_limit()))
        .route("/transcribe-audio", post(transcribe_audio).layer(body_limit()))
        .route("/files/{file_name}", get(get_file))
}

struct UploadedFile {
    name: String,
    bytes: Vec<u8>,
}

/// Pull the `file` field out of a multipart body
async fn read_file_field(
    multipart: std::result::Result<Multipart, MultipartRejection>,
    max_bytes: usize,
) -> Result<UploadedFile> {
    let mut multipart = multipart.map_err(|e| MediaError::InvalidRequest(e.body_text()))?;

    while let Some(field) = multipart.next_field().await.map_err(|e| multipart_error(&e, max_bytes))? {
        if field.name() != Some("file") {
            continue;
        }

        let name = field.file_name().unwrap_or("upload").to_owned();
        let bytes = field.bytes().await.map_err(|e| multipart_error(&e, max_bytes))?;

        if bytes.len() > max_bytes {
            return Err(MediaError::PayloadTooLarge(max_bytes));
        }

        return Ok(UploadedFile {
            name,
            bytes: bytes.to_vec(),
        });
    }

    Err(MediaError::InvalidRequest("missing required 'file' field".to_owned()))
}

fn multipart_error(error: &MultipartError, max_bytes: usize) -> MediaError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        MediaError::PayloadTooLarge(max_bytes)
    } else {
        MediaError::InvalidRequest(error.body_text())
    }
}

async fn upload_file(
    State(service): State<Arc<MediaService>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadOutcome>> {
    let file = read_file_field(multipart, service.max_bytes()).await?;
    let outcome = service.upload(&file.name, &file.bytes).await?;

    Ok(Json(outcome))
}

#[derive(Debug, Serialize)]
struct TranscriptionResponse {
    text: String,
}

async fn transcribe_audio(
    State(service): State<Arc<MediaService>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscriptionResponse>> {
    let file = read_file_field(multipart, service.max_bytes()).await?;
    let text = service.transcribe_upload(&file.name, file.bytes).await?;

    Ok(Json(TranscriptionResponse { text }))
}

async fn get_file(State(service): State<Arc<MediaService>>, Path(file_name): Path<String>) -> Result<Response> {
    let bytes = service.read_file(&file_name).await?;

    let content_type = HeaderValue::from_str(mime_guess::from_path(&file_name).first_or_octet_stream().as_ref())
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    let disposition = HeaderValue::from_str(&format!("inline; filename=\"{file_name}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("inline"));

    let headers = [
        (header::CONTENT_TYPE, content_type),
        (header::CONTENT_DISPOSITION, disposition),
    ];

    Ok((headers, bytes).into_response())
}
