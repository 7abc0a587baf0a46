//! LINE Messaging API: reply client and webhook parsing.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::Duration;
use tracing::warn;

use crate::bot::{InboundMessage, OutboundMessage};

/// The reply endpoint accepts at most this many messages per call.
pub const MAX_REPLY_MESSAGES: usize = 5;
/// Upper bound on one reply call; the webhook is acknowledged after replies are sent.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Client {
    access_token: String,
    api_base: String,
    http: reqwest::Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: &'a [OutboundMessage],
}

impl Client {
    pub fn new(access_token: String, api_base: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(Self {
            access_token,
            api_base: api_base.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub async fn reply(&self, reply_token: &str, messages: &[OutboundMessage]) -> Result<(), Error> {
        let messages = if messages.len() > MAX_REPLY_MESSAGES {
            warn!(
                "Reply has {} messages, sending the first {MAX_REPLY_MESSAGES}",
                messages.len()
            );
            &messages[..MAX_REPLY_MESSAGES]
        } else {
            messages
        };

        let request = ReplyRequest {
            reply_token,
            messages,
        };

        let response = self
            .http
            .post(format!("{}/v2/bot/message/reply", self.api_base))
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!("{status}: {body}")));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum Error {
    Http(String),
    Api(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Http(e) => write!(f, "HTTP error: {e}"),
            Error::Api(e) => write!(f, "API error: {e}"),
        }
    }
}

impl std::error::Error for Error {}

/// Check `x-line-signature`: base64(HMAC-SHA256(secret, body)).
pub fn verify_signature(secret: &str, body: &[u8], signature: &str) -> bool {
    let Ok(expected) = STANDARD.decode(signature.trim()) else {
        return false;
    };
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

#[derive(Deserialize)]
struct WebhookBody {
    #[serde(default)]
    events: Vec<WebhookEvent>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebhookEvent {
    #[serde(rename = "type")]
    event_type: String,
    reply_token: Option<String>,
    source: Option<EventSource>,
    message: Option<EventMessage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventSource {
    user_id: Option<String>,
}

#[derive(Deserialize)]
struct EventMessage {
    #[serde(rename = "type")]
    msg_type: String,
    text: Option<String>,
}

/// Text messages in a webhook body. Other event and message types are dropped.
pub fn parse_events(body: &str) -> Result<Vec<InboundMessage>, serde_json::Error> {
    let body: WebhookBody = serde_json::from_str(body)?;
    let messages = body
        .events
        .into_iter()
        .filter(|event| event.event_type == "message")
        .filter_map(|event| {
            let message = event.message?;
            if message.msg_type != "text" {
                return None;
            }
            Some(InboundMessage {
                reply_token: event.reply_token?,
                user_id: event.source.and_then(|s| s.user_id),
                text: message.text.unwrap_or_default(),
            })
        })
        .collect();
    Ok(messages)
}

#[cfg(test)]
pub(crate) fn sign(secret: &str, body: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(body);
    STANDARD.encode(mac.finalize().into_bytes())
}
