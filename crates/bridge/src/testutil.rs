//! Shared test doubles.

use std::sync::Mutex;

use {anyhow::Result, async_trait::async_trait};

use crate::session::ChatSession;

/// In-memory session that records every delivered text.
#[derive(Default)]
pub(crate) struct RecordingSession {
    sent: Mutex<Vec<(String, String)>>,
    fail_for: Option<String>,
}

impl RecordingSession {
    /// A session that fails every send to `recipient`.
    pub(crate) fn failing_for(recipient: impl Into<String>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_for: Some(recipient.into()),
        }
    }

    pub(crate) fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl ChatSession for RecordingSession {
    async fn send_text(&self, to: &str, text: &str) -> Result<()> {
        if self.fail_for.as_deref() == Some(to) {
            anyhow::bail!("session down for {to}");
        }
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((to.to_string(), text.to_string()));
        Ok(())
    }
}
