//! Inbound message handling for the bridge path.

use std::sync::Arc;

use tracing::{debug, warn};

use {chacra_backend::BackendClient, chacra_messages::InboundMessage};

use crate::session::ChatSession;

/// Reply sent when anything goes wrong while processing a message.
pub const ERROR_FALLBACK: &str = "Ocurrió un error. Intenta más tarde.";

/// Handles one inbound message event at a time.
///
/// Unlike the webhook path, `role` is forwarded only when a default is
/// actually configured; an unset default omits the field entirely.
pub struct InboundHandler {
    backend: Arc<BackendClient>,
    session: Arc<dyn ChatSession>,
    default_role: Option<String>,
}

impl InboundHandler {
    pub fn new(backend: Arc<BackendClient>, session: Arc<dyn ChatSession>) -> Self {
        Self {
            backend,
            session,
            default_role: None,
        }
    }

    #[must_use]
    pub fn with_default_role(mut self, role: impl Into<String>) -> Self {
        self.default_role = Some(role.into());
        self
    }

    /// Process one message event.
    ///
    /// Never fails: on any backend error the sender receives the fixed
    /// fallback reply instead. The sender gets exactly one reply per
    /// invocation.
    pub async fn handle(&self, message: InboundMessage) {
        debug!(sender = %message.sender_id, "forwarding inbound message to backend");

        let request = message.to_request(self.default_role.as_deref());
        let reply = match self.backend.submit_message(&request).await {
            Ok(response) => response.reply_or_fallback().to_string(),
            Err(e) => {
                warn!(sender = %message.sender_id, error = %e, "backend call failed");
                ERROR_FALLBACK.to_string()
            },
        };

        if let Err(e) = self.session.send_text(&message.sender_id, &reply).await {
            warn!(sender = %message.sender_id, error = %e, "failed to deliver reply");
        }
    }
}
