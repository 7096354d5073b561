use mockito::Matcher;
use serde_json::json;

use crate::client::GenerationClient;
use crate::conversation::ConversationBuilder;
use crate::error::Error;
use crate::policy::PolicyConfig;
use crate::transport::openai::{OpenAIConfig, OpenAITransport};
use crate::transport::{ChatRequest, ChatTransport};
use crate::types::Message;

const COMPLETION_BODY: &str = r#"{
    "id": "chatcmpl-123",
    "model": "gpt-3.5-turbo",
    "choices": [{
        "index": 0,
        "message": {"role": "assistant", "content": "{'request': 'q', 'body': 'Bright two-bed flat'}"},
        "finish_reason": "stop"
    }],
    "usage": {"prompt_tokens": 42, "completion_tokens": 9, "total_tokens": 51}
}"#;

fn transport_for(server: &mockito::ServerGuard) -> OpenAITransport {
    OpenAITransport::new(OpenAIConfig::new("test-key").with_base_url(server.url())).unwrap()
}

#[test]
fn test_missing_api_key() {
    let result = OpenAITransport::new(OpenAIConfig::new(""));
    assert!(matches!(result, Err(Error::MissingApiKey(_))));
}

#[test]
fn test_base_url_normalization() {
    let config = OpenAIConfig::new("k").with_base_url("https://proxy.local/v1/chat/completions/");
    assert_eq!(config.base_url, "https://proxy.local/v1");
}

#[test]
fn test_config_debug_hides_key() {
    let rendered = format!("{:?}", OpenAIConfig::new("sk-secret"));
    assert!(!rendered.contains("sk-secret"));
}

#[tokio::test]
async fn test_complete_posts_chat_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-3.5-turbo",
            "max_tokens": 1000,
            "n": 1
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(COMPLETION_BODY)
        .create_async()
        .await;

    let transport = transport_for(&server);
    let response = transport
        .complete(ChatRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![Message::user("hello")],
            max_tokens: 1000,
            temperature: 0.7,
            n: 1,
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(
        response.first_text(),
        Some("{'request': 'q', 'body': 'Bright two-bed flat'}")
    );
    assert_eq!(response.usage.map(|u| u.total_tokens), Some(51));
}

#[tokio::test]
async fn test_error_status_becomes_provider_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_body(r#"{"error": {"message": "Rate limit reached"}}"#)
        .create_async()
        .await;

    let transport = transport_for(&server);
    let err = transport
        .complete(ChatRequest {
            model: "gpt-4".to_string(),
            messages: vec![Message::user("hello")],
            max_tokens: 1000,
            temperature: 0.7,
            n: 1,
        })
        .await
        .unwrap_err();

    match err {
        Error::Provider(message) => {
            assert!(message.contains("429"));
            assert!(message.contains("Rate limit reached"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_client_over_http_decodes_single_quoted_reply() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(COMPLETION_BODY)
        .expect(1)
        .create_async()
        .await;

    let client = GenerationClient::new(transport_for(&server));
    let mut conversation = ConversationBuilder::new(PolicyConfig::default());
    conversation.add_instruction("Describe the flat");

    let body = client.generate_default(&mut conversation).await.unwrap();

    assert_eq!(body, "Bright two-bed flat");
    assert!(conversation.is_empty());
}

#[tokio::test]
async fn test_client_wraps_http_failure() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body("invalid api key")
        .create_async()
        .await;

    let client = GenerationClient::new(transport_for(&server));
    let mut conversation = ConversationBuilder::new(PolicyConfig::default());
    conversation.add_instruction("Describe the flat");

    let err = client.generate_default(&mut conversation).await.unwrap_err();
    assert!(err.is_generation());
    assert!(err.to_string().contains("401"));
}
