//! Normalization of provider payloads into the canonical inbound shape.

use serde::{Deserialize, Serialize};

use crate::agent::AgentRequest;

/// A user message, regardless of which entry path received it.
///
/// Constructed once per received event and discarded after the backend
/// call returns or fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Channel-specific sender identifier (never empty).
    pub sender_id: String,
    /// Message body. Empty when the source omitted it.
    pub text: String,
    /// Optional classification tag routed to the backend.
    pub role: Option<String>,
}

impl InboundMessage {
    pub fn new(sender_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            text: text.into(),
            role: None,
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Extract a message from a WhatsApp Business webhook payload.
    ///
    /// Safe-navigates `entry[0].changes[0].value.messages[0]`. Returns
    /// `None` when no message is present (status updates, delivery
    /// receipts, malformed payloads) — the caller acknowledges receipt
    /// without forwarding anything. A message whose `text.body` is
    /// missing or empty is still a message, with an empty body.
    pub fn from_webhook(payload: &serde_json::Value) -> Option<Self> {
        let message = payload
            .get("entry")?
            .get(0)?
            .get("changes")?
            .get(0)?
            .get("value")?
            .get("messages")?
            .get(0)?;

        let sender_id = message.get("from")?.as_str()?;
        if sender_id.is_empty() {
            return None;
        }

        let text = message
            .get("text")
            .and_then(|t| t.get("body"))
            .and_then(|b| b.as_str())
            .unwrap_or_default();

        Some(Self::new(sender_id, text))
    }

    /// Build the canonical backend request.
    ///
    /// `default_role` is the caller's role policy: the webhook path
    /// always passes its configured fallback, the bridge passes its
    /// optional default. The request carries a `role` key only when a
    /// non-empty value results.
    #[must_use]
    pub fn to_request(&self, default_role: Option<&str>) -> AgentRequest {
        let role = self
            .role
            .clone()
            .or_else(|| default_role.map(str::to_string))
            .filter(|r| !r.is_empty());
        AgentRequest {
            phone: self.sender_id.clone(),
            message: self.text.clone(),
            role,
        }
    }
}
