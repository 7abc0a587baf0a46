//! Webhook HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{debug, error, info, warn};

use crate::bot::BotEngine;
use crate::line;

pub struct AppState {
    pub engine: BotEngine,
    pub line: line::Client,
    pub channel_secret: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/callback", post(callback))
        .fallback(not_found)
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {addr}");
    axum::serve(listener, router(state)).await
}

async fn index() -> &'static str {
    "モンハンワイルズ情報検索ボット (LINE webhook: POST /callback)"
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"error": "Not found"})),
    )
}

async fn callback(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    debug!("Webhook received: {} bytes", body.len());

    let signature = headers
        .get("x-line-signature")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if !line::verify_signature(&state.channel_secret, body.as_bytes(), signature) {
        warn!("Rejected webhook with invalid signature");
        return (StatusCode::BAD_REQUEST, "Invalid signature");
    }

    let messages = match line::parse_events(&body) {
        Ok(messages) => messages,
        Err(e) => {
            error!("Failed to parse webhook body: {e}");
            return (StatusCode::BAD_REQUEST, "Malformed body");
        }
    };

    for message in messages {
        let replies = state
            .engine
            .handle_text(message.user_id.as_deref(), &message.text);
        if let Err(e) = state.line.reply(&message.reply_token, &replies).await {
            error!("Failed to send reply: {e}");
        }
    }

    (StatusCode::OK, "OK")
}
