use {anyhow::Result, async_trait::async_trait};

/// The long-lived chat session capability.
///
/// Owned by the process and injected into both the inbound handler and
/// the alert poller. Implementations wrap whatever transport actually
/// carries the messages; the bridge only needs outbound text.
#[async_trait]
pub trait ChatSession: Send + Sync {
    /// Send plain text to a channel-specific recipient identifier.
    async fn send_text(&self, to: &str, text: &str) -> Result<()>;
}
