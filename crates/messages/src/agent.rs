//! Wire shapes for the backend agent contract.

use serde::{Deserialize, Serialize};

/// Canned reply used when the agent returned no chat text.
pub const NO_REPLY_FALLBACK: &str = "No pude procesar el mensaje.";

/// Request body for `POST {backend}/agent`.
///
/// `role` is serialized only when present; it is never sent as null or
/// an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRequest {
    pub phone: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Reply from `POST {backend}/agent`.
///
/// The agent may legitimately choose not to reply; an absent
/// `model_output.respuesta_chat` is a valid state, not an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentResponse {
    #[serde(default)]
    pub model_output: Option<ModelOutput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelOutput {
    #[serde(default)]
    pub respuesta_chat: Option<String>,
}

impl AgentResponse {
    /// The agent's chat reply, if it produced one.
    pub fn reply_text(&self) -> Option<&str> {
        self.model_output
            .as_ref()
            .and_then(|m| m.respuesta_chat.as_deref())
    }

    /// The chat reply, or the canned no-reply fallback.
    pub fn reply_or_fallback(&self) -> &str {
        self.reply_text().unwrap_or(NO_REPLY_FALLBACK)
    }
}
