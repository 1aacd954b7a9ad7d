mod harness;

use harness::config::ConfigBuilder;
use harness::mock_llm::MockLlm;
use harness::mock_whisper::MockWhisper;
use harness::server::TestServer;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

fn file_form(name: &str, bytes: Vec<u8>) -> Form {
    Form::new().part("file", Part::bytes(bytes).file_name(name.to_owned()))
}

#[tokio::test]
async fn text_upload_is_extracted_and_served_back() {
    let mock = MockLlm::start().await.unwrap();
    let server = TestServer::start(ConfigBuilder::new(&mock.base_url()).build()).await.unwrap();

    let content = "Monsoon notes\nRainfall was above average this year.";
    let response = server
        .client()
        .post(server.url("/upload-file"))
        .multipart(file_form("notes.txt", content.as_bytes().to_vec()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let outcome: Value = response.json().await.unwrap();
    let file_id = outcome["file_id"].as_str().unwrap().to_owned();

    assert!(file_id.ends_with(".txt"), "{file_id}");
    assert_eq!(outcome["original_name"], "notes.txt");
    assert_eq!(outcome["text"], content);
    assert_eq!(outcome["chunk_count"], 1);
    assert!(outcome["estimated_tokens"].as_u64().unwrap() > 0);
    assert!(outcome.get("image_url").is_none());

    let stored = server
        .client()
        .get(server.url(&format!("/files/{file_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(stored.status(), 200);

    let content_type = stored
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(content_type.starts_with("text/plain"), "{content_type}");
    assert_eq!(stored.text().await.unwrap(), content);
}

#[tokio::test]
async fn image_upload_gets_a_public_url() {
    let mock = MockLlm::start().await.unwrap();
    let server = TestServer::start(ConfigBuilder::new(&mock.base_url()).build()).await.unwrap();

    let response = server
        .client()
        .post(server.url("/upload-file"))
        .multipart(file_form("receipt.png", vec![0x89, b'P', b'N', b'G', 0, 1, 2, 3]))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let outcome: Value = response.json().await.unwrap();
    let file_id = outcome["file_id"].as_str().unwrap();
    let image_url = outcome["image_url"].as_str().unwrap();

    assert!(file_id.ends_with(".png"));
    assert!(image_url.ends_with(&format!("/files/{file_id}")), "{image_url}");
    assert!(outcome["text"].is_string());
}

#[tokio::test]
async fn unknown_file_type_is_stored_without_text() {
    let mock = MockLlm::start().await.unwrap();
    let server = TestServer::start(ConfigBuilder::new(&mock.base_url()).build()).await.unwrap();

    let outcome: Value = server
        .client()
        .post(server.url("/upload-file"))
        .multipart(file_form("archive.bin", vec![1, 2, 3, 4]))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(outcome["text"].is_null());
    assert_eq!(outcome["chunk_count"], 0);
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let mock = MockLlm::start().await.unwrap();
    let config = ConfigBuilder::new(&mock.base_url()).with_upload_limit(16).build();
    let server = TestServer::start(config).await.unwrap();

    let response = server
        .client()
        .post(server.url("/upload-file"))
        .multipart(file_form("big.txt", vec![b'x'; 64]))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 413);
}

#[tokio::test]
async fn upload_without_file_field_is_rejected() {
    let mock = MockLlm::start().await.unwrap();
    let server = TestServer::start(ConfigBuilder::new(&mock.base_url()).build()).await.unwrap();

    let form = Form::new().text("note", "no file here");
    let response = server
        .client()
        .post(server.url("/upload-file"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn missing_and_traversal_file_names_are_not_found() {
    let mock = MockLlm::start().await.unwrap();
    let server = TestServer::start(ConfigBuilder::new(&mock.base_url()).build()).await.unwrap();

    for path in ["/files/nope.txt", "/files/..%2FCargo.toml", "/files/.hidden"] {
        let response = server.client().get(server.url(path)).send().await.unwrap();
        assert_eq!(response.status(), 404, "{path}");
    }
}

#[tokio::test]
async fn audio_is_transcribed_through_the_provider() {
    let mock = MockLlm::start().await.unwrap();
    let whisper = MockWhisper::start().await.unwrap();
    let config = ConfigBuilder::new(&mock.base_url())
        .with_transcription(&whisper.base_url())
        .build();
    let server = TestServer::start(config).await.unwrap();

    let response = server
        .client()
        .post(server.url("/transcribe-audio"))
        .multipart(file_form("voice-note.mp3", vec![0xff, 0xfb, 0x90, 0x00]))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["text"], "hello from the recording");

    let uploads = whisper.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].1, "whisper-1");
}

#[tokio::test]
async fn audio_upload_is_transcribed_into_text() {
    let mock = MockLlm::start().await.unwrap();
    let whisper = MockWhisper::start().await.unwrap();
    let config = ConfigBuilder::new(&mock.base_url())
        .with_transcription(&whisper.base_url())
        .build();
    let server = TestServer::start(config).await.unwrap();

    let outcome: Value = server
        .client()
        .post(server.url("/upload-file"))
        .multipart(file_form("memo.wav", b"RIFF0000WAVE".to_vec()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(outcome["text"], "hello from the recording");
}

#[tokio::test]
async fn unsupported_audio_format_is_rejected() {
    let mock = MockLlm::start().await.unwrap();
    let whisper = MockWhisper::start().await.unwrap();
    let config = ConfigBuilder::new(&mock.base_url())
        .with_transcription(&whisper.base_url())
        .build();
    let server = TestServer::start(config).await.unwrap();

    let response = server
        .client()
        .post(server.url("/transcribe-audio"))
        .multipart(file_form("notes.txt", b"not audio".to_vec()))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    assert!(whisper.uploads().is_empty());
}

#[tokio::test]
async fn transcription_without_provider_is_unavailable() {
    let mock = MockLlm::start().await.unwrap();
    let server = TestServer::start(ConfigBuilder::new(&mock.base_url()).build()).await.unwrap();

    let response = server
        .client()
        .post(server.url("/transcribe-audio"))
        .multipart(file_form("voice-note.mp3", vec![0xff, 0xfb]))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 503);
}
