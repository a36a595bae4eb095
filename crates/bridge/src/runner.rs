//! Bridge lifecycle: message-handler and timer-task registration.

use {
    tokio::sync::mpsc,
    tracing::{debug, info},
};

use chacra_messages::InboundMessage;

use crate::{inbound::InboundHandler, poller::AlertPoller};

/// Owns the two bridge tasks and their shared session capability.
///
/// The embedder feeds inbound events through an mpsc channel; the
/// poller runs on its own timer. The two paths are independent — no
/// ordering is guaranteed between a reply and an alert delivery.
pub struct Bridge {
    handler: InboundHandler,
    poller: AlertPoller,
}

impl Bridge {
    pub fn new(handler: InboundHandler, poller: AlertPoller) -> Self {
        Self { handler, poller }
    }

    /// Run until the inbound event stream closes, then tear down the
    /// poller.
    pub async fn run(self, mut events: mpsc::Receiver<InboundMessage>) {
        info!("bridge started");
        let poller = tokio::spawn(self.poller.run());

        while let Some(message) = events.recv().await {
            debug!(sender = %message.sender_id, "inbound event");
            self.handler.handle(message).await;
        }

        info!("inbound event stream closed, stopping bridge");
        poller.abort();
    }
}
