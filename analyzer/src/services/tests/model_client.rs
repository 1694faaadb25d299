//! Tests for the chat-completions client against a mock HTTP server

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared::{GenerationConfig, ModelFailure};

use crate::config::AnalyzerConfig;
use crate::services::model_client::OpenAiModelClient;
use crate::traits::ModelClient;

fn client_for(server: &MockServer) -> OpenAiModelClient {
    let mut config = AnalyzerConfig::new("test-key");
    config.api_base = server.uri();
    OpenAiModelClient::new(&config)
}

fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "choices": [
            {"message": {"role": "assistant", "content": content}}
        ],
        "usage": {"prompt_tokens": 120, "completion_tokens": 45, "total_tokens": 165}
    })
}

#[tokio::test]
async fn test_successful_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("{\"ok\": true}")))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .complete("system", "user", &GenerationConfig::default())
        .await
        .unwrap();

    assert_eq!(response.content, "{\"ok\": true}");
    assert_eq!(response.prompt_tokens, 120);
    assert_eq!(response.completion_tokens, 45);
    assert_eq!(response.total_tokens(), 165);
    assert_eq!(response.model_used, "gpt-4o-mini");
}

#[tokio::test]
async fn test_request_carries_generation_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 1000,
            "temperature": 0.3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("fine")))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .complete("system", "user", &GenerationConfig::default())
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_401_maps_to_auth_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete("system", "user", &GenerationConfig::default())
        .await
        .unwrap_err();
    assert_eq!(err, ModelFailure::AuthFailed);
}

#[tokio::test]
async fn test_429_maps_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete("system", "user", &GenerationConfig::default())
        .await
        .unwrap_err();
    assert_eq!(err, ModelFailure::RateLimited);
}

#[tokio::test]
async fn test_503_maps_to_service_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete("system", "user", &GenerationConfig::default())
        .await
        .unwrap_err();
    assert_eq!(err, ModelFailure::ServiceUnavailable);
}

#[tokio::test]
async fn test_other_status_maps_to_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete("system", "user", &GenerationConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ModelFailure::ServerError(_)));
}

#[tokio::test]
async fn test_missing_content_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete("system", "user", &GenerationConfig::default())
        .await
        .unwrap_err();
    assert_eq!(err, ModelFailure::EmptyResponse);
}

#[tokio::test]
async fn test_blank_content_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("   ")))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete("system", "user", &GenerationConfig::default())
        .await
        .unwrap_err();
    assert_eq!(err, ModelFailure::EmptyResponse);
}
