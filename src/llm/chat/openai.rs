use async_trait::async_trait;
use log::{ debug, info };
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION } };
use serde_json::Value;
use url::Url;

use super::ChatClient;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::llm::{ ChatCompletionRequest, UpstreamReply };

pub struct OpenAIChatClient {
    http: HttpClient,
    url: Url,
}

impl OpenAIChatClient {
    pub fn new(api_key: Option<&str>, url: Url) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // A missing key still goes out as a (rejected) bearer header.
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.unwrap_or_default()))
            .map_err(|e| GatewayError::Config(format!("Invalid API key format: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = HttpClient::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GatewayError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, url })
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        Self::new(config.api_key.as_deref(), config.upstream_url.clone())
    }
}

#[async_trait]
impl ChatClient for OpenAIChatClient {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<UpstreamReply, GatewayError> {
        debug!(
            "Forwarding {} message(s) to {} (model {})",
            request.messages.len(),
            self.url,
            request.model
        );

        let resp = self.http.post(self.url.clone()).json(request).send().await?;
        let status = resp.status().as_u16();
        let bytes = resp.bytes().await?;

        let body = serde_json::from_slice::<Value>(&bytes).unwrap_or_else(|_| {
            info!("Upstream returned a non-JSON body with status {}", status);
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        });

        Ok(UpstreamReply { status, body })
    }
}
