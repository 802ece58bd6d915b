use crate::cli::Args;
use crate::error::GatewayError;
use log::{ info, warn };
use url::Url;

pub const DEFAULT_UPSTREAM_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o";

/// Read-only settings built once at startup and handed to the handlers.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub upstream_url: Url,
    pub api_key: Option<String>,
    pub model: String,
    pub server_api_key: Option<String>,
}

impl GatewayConfig {
    pub fn from_args(args: &Args) -> Result<Self, GatewayError> {
        let upstream_url = Url::parse(&args.upstream_url).map_err(|e|
            GatewayError::Config(format!("Invalid upstream URL '{}': {}", args.upstream_url, e))
        )?;
        if !matches!(upstream_url.scheme(), "http" | "https") {
            return Err(
                GatewayError::Config(
                    format!("Upstream URL must be http or https, got '{}'", upstream_url.scheme())
                )
            );
        }

        let model = args.chat_model.trim();
        if model.is_empty() {
            return Err(GatewayError::Config("Chat model must not be empty".into()));
        }

        Ok(Self {
            upstream_url,
            api_key: non_empty(&args.openai_api_key),
            model: model.to_string(),
            server_api_key: non_empty(&args.server_api_key),
        })
    }

    pub fn log_summary(&self) {
        info!("Upstream URL: {}", self.upstream_url);
        info!("Chat Model: {}", self.model);
        if self.api_key.is_some() {
            info!("Upstream API Key: set");
        } else {
            warn!("Upstream API Key: NOT set. Upstream requests will be sent without a valid token.");
        }
        if self.server_api_key.is_some() {
            info!("Gateway configured with API Key authentication.");
        } else {
            warn!("Gateway configured WITHOUT API Key authentication. Endpoints are open.");
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|k| !k.trim().is_empty()).cloned()
}
