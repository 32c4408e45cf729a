//! Integration tests for the Groq client using wiremock
//!
//! These tests run the client against a mock HTTP server to check the
//! request shape, the error taxonomy and the response cleanup.

use std::time::Duration;

use craft_groq::{CompletionProvider, Error, GroqClient, GroqConfig};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

const COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";
const API_KEY: &str = "gsk_test_key";

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 250, "completion_tokens": 120, "total_tokens": 370 }
    })
}

/// Create a test client configured to use the mock server
fn create_test_client(mock_server: &MockServer) -> GroqClient {
    let config = GroqConfig::default()
        .with_api_url(format!("{}{}", mock_server.uri(), COMPLETIONS_PATH));
    GroqClient::new(config).unwrap()
}

async fn mount_response(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

// ============================================================================
// Success scenarios
// ============================================================================

#[tokio::test]
async fn test_enhance_sends_expected_request_and_cleans_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("authorization", format!("Bearer {API_KEY}").as_str()))
        .and(body_partial_json(serde_json::json!({
            "model": "llama3-8b-8192",
            "max_tokens": 1000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            "\"Enhanced prompt: Context: You are planning a week in Lisbon.\n**Role**: Travel expert\"",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let enhanced = client.enhance("plan a trip to lisbon", API_KEY).await.unwrap();

    assert_eq!(
        enhanced,
        "Context: You are planning a week in Lisbon.\n**Role**: Travel expert"
    );
}

#[tokio::test]
async fn test_enhance_sends_system_and_user_messages() {
    let mock_server = MockServer::start().await;
    mount_response(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(completion_body("Context: ok")),
    )
    .await;

    let client = create_test_client(&mock_server);
    client.enhance("summarize my notes", API_KEY).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert!(messages[0]["content"].as_str().unwrap().contains("C.R.A.F.T."));
    assert_eq!(messages[1]["role"], "user");
    assert!(messages[1]["content"].as_str().unwrap().contains("\"summarize my notes\""));
}

#[tokio::test]
async fn test_noise_headers_are_removed() {
    let mock_server = MockServer::start().await;
    mount_response(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(completion_body(
            "**CRAFT Prompt**\n**Context**: Budget review\n**Action**: 1. Collect data",
        )),
    )
    .await;

    let client = create_test_client(&mock_server);
    let enhanced = client.enhance("review budget", API_KEY).await.unwrap();

    assert_eq!(enhanced, "**Context**: Budget review\n**Action**: 1. Collect data");
}

// ============================================================================
// Error scenarios
// ============================================================================

#[tokio::test]
async fn test_unauthorized_maps_to_invalid_credential() {
    let mock_server = MockServer::start().await;
    mount_response(
        &mock_server,
        ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": { "message": "Invalid API Key", "type": "invalid_request_error" }
        })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let err = client.enhance("hello", API_KEY).await.unwrap_err();

    assert!(matches!(err, Error::InvalidCredential));
}

#[tokio::test]
async fn test_too_many_requests_maps_to_rate_limited() {
    let mock_server = MockServer::start().await;
    mount_response(&mock_server, ResponseTemplate::new(429)).await;

    let client = create_test_client(&mock_server);
    let err = client.enhance("hello", API_KEY).await.unwrap_err();

    assert!(matches!(err, Error::RateLimited));
}

#[tokio::test]
async fn test_bad_request_maps_to_malformed_request() {
    let mock_server = MockServer::start().await;
    mount_response(&mock_server, ResponseTemplate::new(400)).await;

    let client = create_test_client(&mock_server);
    let err = client.enhance("hello", API_KEY).await.unwrap_err();

    assert!(matches!(err, Error::MalformedRequest));
}

#[tokio::test]
async fn test_server_error_maps_to_upstream() {
    let mock_server = MockServer::start().await;
    mount_response(&mock_server, ResponseTemplate::new(503)).await;

    let client = create_test_client(&mock_server);
    let err = client.enhance("hello", API_KEY).await.unwrap_err();

    assert!(matches!(err, Error::Upstream { status: 503, .. }));
    assert_eq!(err.to_string(), "API request failed: 503 Service Unavailable");
}

#[tokio::test]
async fn test_no_choices_is_empty_response() {
    let mock_server = MockServer::start().await;
    mount_response(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let err = client.enhance("hello", API_KEY).await.unwrap_err();

    assert!(matches!(err, Error::EmptyResponse));
}

#[tokio::test]
async fn test_blank_content_is_empty_response() {
    let mock_server = MockServer::start().await;
    mount_response(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(completion_body("   \n  ")),
    )
    .await;

    let client = create_test_client(&mock_server);
    let err = client.enhance("hello", API_KEY).await.unwrap_err();

    assert!(matches!(err, Error::EmptyResponse));
}

#[tokio::test]
async fn test_boilerplate_only_is_empty_response() {
    let mock_server = MockServer::start().await;
    mount_response(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(completion_body("**Enhanced Prompt**")),
    )
    .await;

    let client = create_test_client(&mock_server);
    let err = client.enhance("hello", API_KEY).await.unwrap_err();

    assert!(matches!(err, Error::EmptyResponse));
}

#[tokio::test]
async fn test_invalid_json_is_serialization_error() {
    let mock_server = MockServer::start().await;
    mount_response(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("<html>gateway</html>"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let err = client.enhance("hello", API_KEY).await.unwrap_err();

    assert!(matches!(err, Error::Serialization(_)));
}

#[tokio::test]
async fn test_blank_key_fails_without_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Context: x")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.enhance("hello", "   ").await.unwrap_err();

    assert!(matches!(err, Error::MissingCredential));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let config = GroqConfig::default().with_api_url("http://127.0.0.1:1/openai/v1/chat/completions");
    let client = GroqClient::new(config).unwrap();

    let err = client.enhance("hello", API_KEY).await.unwrap_err();

    assert!(matches!(err, Error::Network(_)));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let mock_server = MockServer::start().await;
    mount_response(
        &mock_server,
        ResponseTemplate::new(200)
            .set_body_json(completion_body("Context: late"))
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let config = GroqConfig {
        api_url: format!("{}{}", mock_server.uri(), COMPLETIONS_PATH),
        timeout_secs: 1,
        ..Default::default()
    };
    let client = GroqClient::new(config).unwrap();

    let err = client.enhance("hello", API_KEY).await.unwrap_err();

    assert!(matches!(err, Error::Timeout(_)), "got {err:?}");
}

// ============================================================================
// Key validation
// ============================================================================

#[tokio::test]
async fn test_validate_key_accepts_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(body_partial_json(serde_json::json!({ "max_tokens": 5 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Hi")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    assert!(client.validate_key(API_KEY).await);
}

#[tokio::test]
async fn test_validate_key_rejects_unauthorized() {
    let mock_server = MockServer::start().await;
    mount_response(&mock_server, ResponseTemplate::new(401)).await;

    let client = create_test_client(&mock_server);
    assert!(!client.validate_key(API_KEY).await);
    assert!(!client.validate_key("").await);
}

#[tokio::test]
async fn test_validate_key_accepts_plain_text_success() {
    let mock_server = MockServer::start().await;
    mount_response(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("ok"),
    )
    .await;

    let client = create_test_client(&mock_server);
    assert!(client.validate_key(API_KEY).await);
}

#[tokio::test]
async fn test_validate_key_rejects_server_error() {
    let mock_server = MockServer::start().await;
    mount_response(&mock_server, ResponseTemplate::new(503)).await;

    let client = create_test_client(&mock_server);
    assert!(!client.validate_key(API_KEY).await);
}
