use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::client::GenerationClient;
use crate::conversation::ConversationBuilder;
use crate::error::{Error, Result};
use crate::partition::{CountPartition, TokenEstimatePartition};
use crate::policy::PolicyConfig;
use crate::transport::{ChatRequest, ChatResponse, ChatTransport};
use crate::types::{ModelTier, Role};

/// Stub transport that records every request and replays canned replies in order
#[derive(Default)]
struct RecordingTransport {
    calls: Mutex<Vec<ChatRequest>>,
    replies: Mutex<VecDeque<Result<ChatResponse>>>,
}

impl RecordingTransport {
    fn replying<I, S>(replies: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let transport = Self::default();
        transport.replies.lock().unwrap().extend(
            replies
                .into_iter()
                .map(|text| Ok(ChatResponse::from_text(text))),
        );
        Arc::new(transport)
    }

    fn failing(error: Error) -> Arc<Self> {
        let transport = Self::default();
        transport.replies.lock().unwrap().push_back(Err(error));
        Arc::new(transport)
    }

    fn calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    fn transport_id(&self) -> &str {
        "recording"
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse> {
        self.calls.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::provider_error("no reply queued")))
    }
}

fn plain_builder() -> ConversationBuilder {
    ConversationBuilder::new(PolicyConfig::builder().markup(false).build().unwrap())
}

#[tokio::test]
async fn test_end_to_end_markup_scenario() {
    let policy = PolicyConfig::builder()
        .language("ru")
        .max_body_length(300)
        .markup(true)
        .build()
        .unwrap();
    let mut conversation = ConversationBuilder::new(policy);
    conversation.add_instruction("Where to buy a house in London?");
    conversation.add_message(Role::Assistant, "You are a real estate agent");

    let transport =
        RecordingTransport::replying([r#"{"request":"...","body":"<p>Some text</p>"}"#]);
    let client = GenerationClient::from_arc(transport.clone());

    let body = client.generate_default(&mut conversation).await.unwrap();

    assert_eq!(body, "<p>Some text</p>");
    assert!(conversation.is_empty());

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    let sent = &calls[0];
    assert_eq!(sent.model, "gpt-3.5-turbo");
    assert_eq!(sent.max_tokens, 1000);
    assert_eq!(sent.n, 1);
    assert!((sent.temperature - 0.7).abs() < f32::EPSILON);
    assert_eq!(sent.messages.len(), 6);
    assert_eq!(sent.messages[0].content, "Your language (iso): ru");
    assert_eq!(sent.messages[4].role, Role::User);
    assert_eq!(sent.messages[5].role, Role::Assistant);
}

#[tokio::test]
async fn test_batches_are_sent_in_order_and_concatenated() {
    let mut conversation = plain_builder();
    conversation.add_instruction("one");
    conversation.add_instruction("two");
    // 3 directives + 2 instructions = 5 messages, batch size 2 => 3 calls

    let transport = RecordingTransport::replying([
        r#"{"request": "q", "#,
        r#""body": "hel"#,
        r#"lo"}"#,
    ]);
    let client =
        GenerationClient::from_arc(transport.clone()).with_partition(CountPartition::new(2));

    let body = client.generate(&mut conversation, 0.2).await.unwrap();
    assert_eq!(body, "hello");

    let calls = transport.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(
        calls.iter().map(|c| c.messages.len()).collect::<Vec<_>>(),
        vec![2, 2, 1]
    );
    assert_eq!(calls[0].messages[0].content, "Your language (iso): en");
    assert_eq!(calls[2].messages[0].content, "two");
    assert!(calls.iter().all(|c| (c.temperature - 0.2).abs() < f32::EPSILON));
}

#[tokio::test]
async fn test_token_estimate_partition_plugs_in() {
    let mut conversation = plain_builder();
    conversation.add_instruction("x".repeat(2000));

    let transport = RecordingTransport::replying(["a", "b"]);
    let client = GenerationClient::from_arc(transport.clone())
        .with_partition(TokenEstimatePartition::new(200));

    let body = client.generate_default(&mut conversation).await.unwrap();

    assert_eq!(body, "ab");
    assert_eq!(transport.calls().len(), 2);
}

#[tokio::test]
async fn test_malformed_reply_returned_raw_and_builder_cleared() {
    let mut conversation = plain_builder();
    conversation.add_instruction("Describe the flat");

    let transport = RecordingTransport::replying(["Sorry, I can only answer in prose."]);
    let client = GenerationClient::from_arc(transport);

    let body = client.generate_default(&mut conversation).await.unwrap();

    assert_eq!(body, "Sorry, I can only answer in prose.");
    assert_eq!(conversation.len(), 0);
}

#[tokio::test]
async fn test_transport_failure_is_wrapped_and_not_retried() {
    let mut conversation = plain_builder();
    conversation.add_instruction("Describe the flat");

    let transport =
        RecordingTransport::failing(Error::provider_error("OpenAI API error 429: slow down"));
    let client = GenerationClient::from_arc(transport.clone());

    let err = client
        .generate_default(&mut conversation)
        .await
        .unwrap_err();

    assert!(err.is_generation());
    assert!(err.to_string().contains("429"));
    assert_eq!(transport.calls().len(), 1);
    assert!(conversation.is_empty());
}

#[tokio::test]
async fn test_empty_candidate_list_is_generation_error() {
    let transport = Arc::new(RecordingTransport::default());
    transport
        .replies
        .lock()
        .unwrap()
        .push_back(Ok(ChatResponse::default()));

    let mut conversation = plain_builder();
    conversation.add_instruction("hi");
    let err = GenerationClient::from_arc(transport)
        .generate_default(&mut conversation)
        .await
        .unwrap_err();

    assert!(err.is_generation());
}

#[tokio::test]
async fn test_advanced_tier_selects_higher_model() {
    let policy = PolicyConfig::builder()
        .model_tier(ModelTier::Advanced)
        .build()
        .unwrap();
    let mut conversation = ConversationBuilder::new(policy);
    conversation.add_instruction("hi");

    let transport = RecordingTransport::replying([r#"{"request":"hi","body":"hello"}"#]);
    GenerationClient::from_arc(transport.clone())
        .generate_default(&mut conversation)
        .await
        .unwrap();

    assert_eq!(transport.calls()[0].model, "gpt-4");
}

#[tokio::test]
async fn test_builder_reusable_across_cycles() {
    let mut conversation = plain_builder();
    let transport = RecordingTransport::replying([
        r#"{"request":"a","body":"first"}"#,
        r#"{"request":"b","body":"second"}"#,
    ]);
    let client = GenerationClient::from_arc(transport.clone());

    conversation.add_instruction("a");
    assert_eq!(client.generate_default(&mut conversation).await.unwrap(), "first");

    conversation.add_instruction("b");
    assert_eq!(client.generate_default(&mut conversation).await.unwrap(), "second");

    let calls = transport.calls();
    assert_eq!(calls[1].messages.len(), 4);
    assert_eq!(calls[1].messages[0].content, "Your language (iso): en");
}

#[tokio::test]
async fn test_empty_conversation_skips_transport() {
    let mut conversation = plain_builder();
    conversation.reset();

    let transport = RecordingTransport::replying(["unused"]);
    let body = GenerationClient::from_arc(transport.clone())
        .generate_default(&mut conversation)
        .await
        .unwrap();

    assert_eq!(body, "");
    assert!(transport.calls().is_empty());
}
