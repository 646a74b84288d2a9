mod common;

use common::TestApp;
use relay_service::services::providers::mock::{FailingTextProvider, MockTextProvider};
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn chat_with_valid_prompt_returns_provider_text() {
    let app = TestApp::spawn(Arc::new(MockTextProvider::with_response("Hello"))).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/chat", app.address))
        .json(&json!({ "prompt": "Tell me a story" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["response"], "Hello");
}

#[tokio::test]
async fn chat_with_short_prompt_returns_400() {
    let app = TestApp::spawn(Arc::new(MockTextProvider::new(true))).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/chat", app.address))
        .json(&json!({ "prompt": "hi" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn chat_with_whitespace_prompt_returns_400() {
    let app = TestApp::spawn(Arc::new(MockTextProvider::new(true))).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/chat", app.address))
        .json(&json!({ "prompt": "   " }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Invalid request: prompt is required.");
}

#[tokio::test]
async fn chat_with_missing_body_returns_400() {
    let app = TestApp::spawn(Arc::new(MockTextProvider::new(true))).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/chat", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn chat_with_malformed_json_returns_400() {
    let app = TestApp::spawn(Arc::new(MockTextProvider::new(true))).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/chat", app.address))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn chat_with_messages_returns_provider_text() {
    let app = TestApp::spawn(Arc::new(MockTextProvider::new(true))).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/chat", app.address))
        .json(&json!({
            "messages": [
                { "role": "user", "content": "What is Rust?" },
                { "role": "assistant", "content": "A systems language." },
                { "role": "user", "content": "Tell me more" }
            ]
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["response"], "Mock response for: Tell me more");
}

#[tokio::test]
async fn chat_with_empty_messages_returns_400() {
    let app = TestApp::spawn(Arc::new(MockTextProvider::new(true))).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/chat", app.address))
        .json(&json!({ "messages": [] }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn chat_with_neither_field_returns_400() {
    let app = TestApp::spawn(Arc::new(MockTextProvider::new(true))).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/chat", app.address))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn chat_provider_failure_returns_500_with_details() {
    let app = TestApp::spawn(Arc::new(FailingTextProvider::new("boom"))).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/chat", app.address))
        .json(&json!({ "prompt": "Tell me a story" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 500);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Error generating text");
    assert_eq!(body["details"], "boom");
}
