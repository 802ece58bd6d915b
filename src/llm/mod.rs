pub mod chat;

use crate::models::chat::{ ChatMessage, InvocationRequest };
use serde::Serialize;
use serde_json::Value;

/// Body sent to the upstream chat-completion endpoint.
///
/// Sampling is always deterministic and streaming always off; only the model
/// and the conversation vary between requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    temperature: f32,
    stream: bool,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, request: InvocationRequest) -> Self {
        Self {
            model: model.into(),
            messages: request.into_messages(),
            temperature: 0.0,
            stream: false,
        }
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn stream(&self) -> bool {
        self.stream
    }
}

/// Raw outcome of one upstream round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Value,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::Role;
    use serde_json::json;

    #[test]
    fn test_payload_fixes_generation_parameters() {
        let req: InvocationRequest = serde_json::from_value(json!({
            "input": "Hello",
            "chat_history": [{ "role": "assistant", "content": "Hi there" }]
        })).unwrap();

        let payload = ChatCompletionRequest::new("gpt-4o", req);
        assert_eq!(payload.temperature(), 0.0);
        assert!(!payload.stream());

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["temperature"].as_f64(), Some(0.0));
        assert_eq!(value["stream"], json!(false));
        assert_eq!(
            value["messages"],
            json!([
                { "role": "assistant", "content": "Hi there" },
                { "role": "user", "content": "Hello" }
            ])
        );
    }

    #[test]
    fn test_payload_with_empty_history_has_single_user_turn() {
        let req: InvocationRequest = serde_json::from_value(json!({ "input": "Hello" })).unwrap();
        let payload = ChatCompletionRequest::new("gpt-4o-mini", req);

        assert_eq!(payload.messages.len(), 1);
        assert_eq!(payload.messages[0].role, Role::User);
        assert_eq!(payload.messages[0].content, "Hello");
    }

    #[test]
    fn test_only_200_counts_as_success() {
        assert!(UpstreamReply { status: 200, body: json!({}) }.is_success());
        assert!(!(UpstreamReply { status: 201, body: json!({}) }).is_success());
        assert!(!(UpstreamReply { status: 401, body: json!({}) }).is_success());
    }
}
