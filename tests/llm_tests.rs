// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::sync::Arc;

use greenloop::assistant::prompts::{BUSY_REPLY, EMPTY_REPLY, MAINTENANCE_REPLY};
use greenloop::assistant::{Assistant, ClassificationResult};
use greenloop::llm::mock_provider::MockProvider;
use greenloop::llm::providers::GeminiProvider;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-2.5-flash";

fn gemini_text(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
    })
}

async fn assistant_for(server: &MockServer) -> Assistant {
    let provider = GeminiProvider::with_base_url(Some("test-key".to_string()), MODEL, server.uri());
    Assistant::new(Arc::new(provider))
}

#[tokio::test]
async fn test_chat_reply_without_credential_makes_no_call() {
    let provider = MockProvider::unconfigured();
    let assistant = Assistant::new(Arc::new(provider.clone()));

    assert_eq!(assistant.chat_reply("Xin chào").await, MAINTENANCE_REPLY);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_classify_without_credential_uses_demo_record() {
    let assistant = Assistant::new(Arc::new(GeminiProvider::new(None, MODEL)));
    let result = assistant.classify_waste_image("iVBORw0KGgo=").await;

    assert_eq!(result.points, 50);
    assert_eq!(result.waste_type, "Rác Tái Chế (Nhựa)");
}

#[tokio::test]
async fn test_chat_reply_over_gemini() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/{}:generateContent", MODEL)))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{"role": "user", "parts": [{"text": "Pin cũ bỏ ở đâu?"}]}]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(gemini_text("Mang pin cũ đến điểm thu gom.")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = assistant_for(&server).await.chat_reply("Pin cũ bỏ ở đâu?").await;
    assert_eq!(reply, "Mang pin cũ đến điểm thu gom.");
}

#[tokio::test]
async fn test_chat_reply_empty_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})))
        .mount(&server)
        .await;

    assert_eq!(assistant_for(&server).await.chat_reply("?").await, EMPTY_REPLY);
}

#[tokio::test]
async fn test_chat_reply_provider_error_is_busy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert_eq!(assistant_for(&server).await.chat_reply("hi").await, BUSY_REPLY);
}

#[tokio::test]
async fn test_classify_extracts_embedded_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{"parts": [{}, {"inlineData": {"mimeType": "image/jpeg", "data": "QUJD"}}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_text(
            r#"Analyzing... {"type":"Organic","confidence":"80%","points":10,"message":"ok"}"#,
        )))
        .mount(&server)
        .await;

    let result = assistant_for(&server).await.classify_waste_image("QUJD").await;

    assert_eq!(
        result,
        ClassificationResult {
            waste_type: "Organic".to_string(),
            confidence: "80%".to_string(),
            points: 10,
            message: "ok".to_string(),
        }
    );
}

#[tokio::test]
async fn test_classify_without_json_echoes_prefix() {
    let raw = "Ảnh hơi mờ, có thể là hộp giấy hoặc túi nilon. Vui lòng chụp lại ở nơi có ánh sáng tốt hơn để nhận diện chính xác hơn nhé.";
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_text(raw)))
        .mount(&server)
        .await;

    let result = assistant_for(&server).await.classify_waste_image("QUJD").await;

    assert!(result.message.chars().count() <= 100);
    assert!(raw.starts_with(&result.message));
    assert_ne!(result, ClassificationResult::unrecognized());
}

#[tokio::test]
async fn test_classify_network_failure_is_unrecognized() {
    // Reserve a free port, then release it so connections are refused.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let provider = GeminiProvider::with_base_url(
        Some("test-key".to_string()),
        MODEL,
        format!("http://127.0.0.1:{}", port),
    );
    let result = Assistant::new(Arc::new(provider))
        .classify_waste_image("QUJD")
        .await;

    assert_eq!(
        result,
        ClassificationResult {
            waste_type: "Không xác định".to_string(),
            confidence: "0%".to_string(),
            points: 0,
            message: "Không thể nhận diện ảnh.".to_string(),
        }
    );
}
