mod harness;

use harness::config::ConfigBuilder;
use harness::mock_llm::MockLlm;
use harness::server::TestServer;
use serde_json::{Value, json};

async fn start() -> (MockLlm, TestServer) {
    let mock = MockLlm::start().await.unwrap();
    let server = TestServer::start(ConfigBuilder::new(&mock.base_url()).build()).await.unwrap();
    (mock, server)
}

async fn post(server: &TestServer, path: &str, body: &Value) -> reqwest::Response {
    server.client().post(server.url(path)).json(body).send().await.unwrap()
}

#[tokio::test]
async fn hello_greets() {
    let (_mock, server) = start().await;

    let body: Value = server
        .client()
        .get(server.url("/hello"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["message"], "Hello! How can I assist you today?");
}

#[tokio::test]
async fn store_user_requires_email() {
    let (_mock, server) = start().await;

    let ok = post(&server, "/auth/store-user", &json!({ "email": "meera@example.com" })).await;
    assert_eq!(ok.status(), 200);
    assert_eq!(ok.json::<Value>().await.unwrap(), json!({ "status": "ok" }));

    let missing = post(&server, "/auth/store-user", &json!({ "email": "  " })).await;
    assert_eq!(missing.status(), 400);
}

#[tokio::test]
async fn contact_feedback_requires_message() {
    let (_mock, server) = start().await;

    let ok = post(
        &server,
        "/contact-feedback",
        &json!({ "name": "Meera", "email": "meera@example.com", "message": "Love the weather answers" }),
    )
    .await;
    assert_eq!(ok.status(), 200);

    let missing = post(&server, "/contact-feedback", &json!({ "name": "Meera" })).await;
    assert_eq!(missing.status(), 400);
    let body: Value = missing.json().await.unwrap();
    assert_eq!(body["error"]["type"], "invalid_request_error");
}

#[tokio::test]
async fn message_feedback_accepts_like_and_dislike_only() {
    let (_mock, server) = start().await;

    for kind in ["like", "dislike"] {
        let resp = post(&server, "/message-feedback", &json!({ "message_id": "m-1", "type": kind })).await;
        assert_eq!(resp.status(), 200, "{kind}");
    }

    let resp = post(&server, "/message-feedback", &json!({ "message_id": "m-1", "type": "meh" })).await;
    assert_eq!(resp.status(), 400);

    let resp = post(&server, "/message-feedback", &json!({ "type": "like" })).await;
    assert_eq!(resp.status(), 400);
}
