pub mod openai;

use async_trait::async_trait;
use std::sync::Arc;

use self::openai::OpenAIChatClient;
use super::{ ChatCompletionRequest, UpstreamReply };
use crate::config::GatewayConfig;
use crate::error::GatewayError;

/// One synchronous round trip to an upstream chat-completion API.
///
/// Implementations report whatever status the upstream answered with; only a
/// failure to get an answer at all is an `Err`.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<UpstreamReply, GatewayError>;
}

pub fn new_client(config: &GatewayConfig) -> Result<Arc<dyn ChatClient>, GatewayError> {
    let client = OpenAIChatClient::from_config(config)?;
    Ok(Arc::new(client))
}
