use serde::{ Deserialize, Deserializer, Serialize };

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// Body of `POST /api/invoke-model`.
#[derive(Clone, Debug, Deserialize)]
pub struct InvocationRequest {
    pub input: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub chat_history: Vec<ChatMessage>,
}

impl InvocationRequest {
    /// The conversation to forward: prior turns in order, then `input` as the
    /// newest user turn.
    pub fn into_messages(self) -> Vec<ChatMessage> {
        let mut messages = self.chat_history;
        messages.push(ChatMessage::user(self.input));
        messages
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ChatMessage>, D::Error>
    where D: Deserializer<'de>
{
    Ok(Option::<Vec<ChatMessage>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatbotRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChatbotResponse {
    pub message: String,
}
