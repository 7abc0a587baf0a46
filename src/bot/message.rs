//! Inbound and outbound message types.
//!
//! Outbound messages serialize directly into the LINE Messaging API message
//! objects (`{"type": "text", ...}` / `{"type": "image", ...}`).

use serde::Serialize;

/// A text message received from a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Opaque token used to send the reply.
    pub reply_token: String,
    /// Sender's user ID, if the platform disclosed it.
    pub user_id: Option<String>,
    pub text: String,
}

/// One message in a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutboundMessage {
    Text {
        text: String,
        #[serde(rename = "quickReply", skip_serializing_if = "Option::is_none")]
        quick_reply: Option<QuickReply>,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        original_content_url: String,
        preview_image_url: String,
    },
}

impl OutboundMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            quick_reply: None,
        }
    }

    /// Image whose preview is the image itself.
    pub fn image(url: &str) -> Self {
        Self::Image {
            original_content_url: url.to_string(),
            preview_image_url: url.to_string(),
        }
    }

    pub fn with_quick_reply(text: impl Into<String>, buttons: &[(&str, &str)]) -> Self {
        Self::Text {
            text: text.into(),
            quick_reply: Some(QuickReply::from_buttons(buttons)),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            Self::Image { .. } => None,
        }
    }
}

/// Buttons shown under a text message; tapping one sends its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickReply {
    pub items: Vec<QuickReplyItem>,
}

impl QuickReply {
    /// Build from (label, text) pairs.
    pub fn from_buttons(buttons: &[(&str, &str)]) -> Self {
        let items = buttons
            .iter()
            .map(|(label, text)| QuickReplyItem {
                kind: "action",
                action: MessageAction {
                    kind: "message",
                    label: label.to_string(),
                    text: text.to_string(),
                },
            })
            .collect();
        Self { items }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickReplyItem {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub action: MessageAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageAction {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub label: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_message_json() {
        let msg = OutboundMessage::text("hello");
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"type": "text", "text": "hello"})
        );
    }

    #[test]
    fn test_image_message_json() {
        let msg = OutboundMessage::image("https://example.com/a.jpg");
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({
                "type": "image",
                "originalContentUrl": "https://example.com/a.jpg",
                "previewImageUrl": "https://example.com/a.jpg"
            })
        );
    }

    #[test]
    fn test_quick_reply_json() {
        let msg = OutboundMessage::with_quick_reply("どれ？", &[("全部", "画像表示オン")]);
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({
                "type": "text",
                "text": "どれ？",
                "quickReply": {"items": [
                    {"type": "action", "action": {"type": "message", "label": "全部", "text": "画像表示オン"}}
                ]}
            })
        );
    }
}
