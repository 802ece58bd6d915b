use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::llm::chat::ChatClient;
use crate::llm::{ ChatCompletionRequest, UpstreamReply };
use crate::models::chat::{ ChatbotRequest, ChatbotResponse, InvocationRequest };
use std::collections::HashMap;
use std::sync::Arc;
use axum::{
    body::Bytes,
    extract::{ rejection::JsonRejection, Query, Request, State },
    http::StatusCode,
    middleware::{ self, Next },
    response::{ IntoResponse, Response },
    routing::{ get, post },
    Json,
    Router,
};
use serde_json::{ json, Value };
use tower_http::cors::{ Any, CorsLayer };
use uuid::Uuid;
use log::{ info, warn, error, debug };

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub upstream: Arc<dyn ChatClient>,
}

impl AppState {
    pub fn new(config: GatewayConfig, upstream: Arc<dyn ChatClient>) -> Self {
        Self { config: Arc::new(config), upstream }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    let protected = Router::new()
        .route("/api/invoke-model", post(invoke_model_handler))
        .route("/chatbot", post(chatbot_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    Router::new()
        .merge(protected)
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

async fn require_api_key(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    req: Request,
    next: Next
) -> Result<Response, GatewayError> {
    let Some(required) = state.config.server_api_key.as_deref() else {
        return Ok(next.run(req).await);
    };

    let provided = req
        .headers()
        .get("X-API-Key")
        .and_then(|v| v.to_str().ok())
        .or_else(|| params.get("api_key").map(String::as_str));

    if provided != Some(required) {
        warn!("{} {}: bad or missing API key", req.method(), req.uri().path());
        return Err(GatewayError::Unauthorized);
    }

    Ok(next.run(req).await)
}

async fn invoke_model_handler(
    State(state): State<AppState>,
    payload: Result<Json<InvocationRequest>, JsonRejection>
) -> Result<Response, GatewayError> {
    let request_id = Uuid::new_v4();
    let Json(req) = payload.map_err(|rejection| {
        warn!("[{}] Rejected invoke-model request: {}", request_id, rejection.body_text());
        GatewayError::MalformedRequest(rejection.body_text())
    })?;

    info!(
        "[{}] invoke-model with {} prior message(s)",
        request_id,
        req.chat_history.len()
    );

    let upstream_req = ChatCompletionRequest::new(state.config.model.clone(), req);
    let reply = state.upstream.complete(&upstream_req).await.map_err(|e| {
        error!("[{}] {}", request_id, e);
        e
    })?;

    info!("[{}] Upstream responded with status {}", request_id, reply.status);
    Ok(relay(request_id, reply))
}

/// 200 passes through untouched; anything else is wrapped under `error` with
/// the upstream status preserved.
fn relay(request_id: Uuid, reply: UpstreamReply) -> Response {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);

    if reply.is_success() {
        info!("[{}] {}", request_id, reply.body);
        (status, Json(reply.body)).into_response()
    } else {
        warn!("[{}] Upstream rejected request: {}", request_id, reply.body);
        (status, Json(json!({ "error": reply.body }))).into_response()
    }
}

async fn chatbot_handler(body: Bytes) -> Result<Json<ChatbotResponse>, GatewayError> {
    let req: ChatbotRequest = serde_json::from_slice(&body).map_err(|e|
        GatewayError::MalformedRequest(e.to_string())
    )?;
    debug!("chatbot message received ({} chars)", req.message.as_deref().map_or(0, str::len));

    Ok(Json(ChatbotResponse::default()))
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
