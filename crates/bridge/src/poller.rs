//! Recurring delivery of pending backend alerts.

use std::{sync::Arc, time::Duration};

use {
    tokio::time::{self, MissedTickBehavior},
    tracing::{debug, warn},
};

use chacra_backend::BackendClient;

use crate::session::ChatSession;

/// Default poll interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Fetches pending alerts on a fixed interval and delivers each one
/// through the chat session, acknowledging successful deliveries.
///
/// An alert transitions to "sent" server-side only after both the
/// session send and the acknowledgment succeed. A failed
/// acknowledgment leaves it pending, so the same alert is redelivered
/// on the next cycle — at-least-once delivery, duplicates accepted.
pub struct AlertPoller {
    backend: Arc<BackendClient>,
    session: Arc<dyn ChatSession>,
    interval: Duration,
}

impl AlertPoller {
    pub fn new(backend: Arc<BackendClient>, session: Arc<dyn ChatSession>) -> Self {
        Self {
            backend,
            session,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Drive poll cycles forever.
    pub async fn run(self) {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.poll_once().await;
        }
    }

    /// One poll cycle: fetch the pending batch and process it in
    /// order. A fetch failure skips the whole cycle; a per-alert
    /// failure never blocks the rest of the batch.
    pub async fn poll_once(&self) {
        let alerts = match self.backend.fetch_pending_alerts().await {
            Ok(alerts) => alerts,
            Err(e) => {
                warn!(error = %e, "alert fetch failed, skipping cycle");
                return;
            },
        };

        if alerts.is_empty() {
            return;
        }
        debug!(count = alerts.len(), "delivering pending alerts");

        for alert in &alerts {
            let text = alert.display_text();
            if let Err(e) = self.session.send_text(&alert.phone, &text).await {
                warn!(alert_id = %alert.id, error = %e, "alert delivery failed, retrying next cycle");
                continue;
            }
            if let Err(e) = self.backend.acknowledge_alert_sent(&alert.id).await {
                // The alert stays pending server-side and will be
                // redelivered; duplicates are the accepted trade-off.
                warn!(alert_id = %alert.id, error = %e, "acknowledgment failed, alert will be redelivered");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use {super::*, crate::testutil::RecordingSession};

    fn poller(server: &mockito::Server, session: Arc<RecordingSession>) -> AlertPoller {
        let backend = Arc::new(BackendClient::new(Url::parse(&server.url()).unwrap()).unwrap());
        AlertPoller::new(backend, session)
    }

    fn pending_body(alerts: serde_json::Value) -> String {
        serde_json::json!({ "alerts": alerts }).to_string()
    }

    #[tokio::test]
    async fn delivers_and_acknowledges_each_alert_once() {
        let mut server = mockito::Server::new_async().await;
        let _fetch = server
            .mock("GET", "/alerts/pending")
            .with_status(200)
            .with_body(pending_body(serde_json::json!([
                { "id": "a1", "phone": "+1555", "level": "high",
                  "reason": "timeout", "action": "retry" },
                { "id": "a2", "phone": "+1666", "message": "Cosecha lista" }
            ])))
            .create_async()
            .await;
        let ack1 = server
            .mock("POST", "/alerts/a1/sent")
            .expect(1)
            .with_status(200)
            .create_async()
            .await;
        let ack2 = server
            .mock("POST", "/alerts/a2/sent")
            .expect(1)
            .with_status(200)
            .create_async()
            .await;

        let session = Arc::new(RecordingSession::default());
        poller(&server, Arc::clone(&session)).poll_once().await;

        assert_eq!(
            session.sent(),
            vec![
                ("+1555".to_string(), "Alerta high: timeout. Acción: retry".to_string()),
                ("+1666".to_string(), "Cosecha lista".to_string()),
            ]
        );
        ack1.assert_async().await;
        ack2.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_failure_skips_cycle() {
        let mut server = mockito::Server::new_async().await;
        let _fetch = server
            .mock("GET", "/alerts/pending")
            .with_status(500)
            .create_async()
            .await;

        let session = Arc::new(RecordingSession::default());
        poller(&server, Arc::clone(&session)).poll_once().await;
        assert!(session.sent().is_empty());
    }

    #[tokio::test]
    async fn one_failed_delivery_does_not_abort_the_batch() {
        let mut server = mockito::Server::new_async().await;
        let _fetch = server
            .mock("GET", "/alerts/pending")
            .with_status(200)
            .with_body(pending_body(serde_json::json!([
                { "id": "a1", "phone": "+1555", "message": "primera" },
                { "id": "a2", "phone": "+1666", "message": "segunda" }
            ])))
            .create_async()
            .await;
        let ack1 = server
            .mock("POST", "/alerts/a1/sent")
            .expect(0)
            .create_async()
            .await;
        let ack2 = server
            .mock("POST", "/alerts/a2/sent")
            .expect(1)
            .with_status(200)
            .create_async()
            .await;

        // Sends to +1555 fail; the second alert must still go out.
        let session = Arc::new(RecordingSession::failing_for("+1555"));
        poller(&server, Arc::clone(&session)).poll_once().await;

        assert_eq!(session.sent(), vec![("+1666".to_string(), "segunda".to_string())]);
        ack1.assert_async().await;
        ack2.assert_async().await;
    }

    #[tokio::test]
    async fn failed_ack_leads_to_redelivery_next_cycle() {
        let mut server = mockito::Server::new_async().await;
        // The alert stays in the pending set because the ack never lands.
        let fetch = server
            .mock("GET", "/alerts/pending")
            .expect(2)
            .with_status(200)
            .with_body(pending_body(serde_json::json!([
                { "id": "a1", "phone": "+1555", "message": "urgente" }
            ])))
            .create_async()
            .await;
        let ack = server
            .mock("POST", "/alerts/a1/sent")
            .expect(2)
            .with_status(500)
            .create_async()
            .await;

        let session = Arc::new(RecordingSession::default());
        let poller = poller(&server, Arc::clone(&session));
        poller.poll_once().await;
        poller.poll_once().await;

        // Delivered twice — at-least-once, not exactly-once.
        assert_eq!(session.sent().len(), 2);
        fetch.assert_async().await;
        ack.assert_async().await;
    }

    #[tokio::test]
    async fn empty_batch_is_a_quiet_cycle() {
        let mut server = mockito::Server::new_async().await;
        let _fetch = server
            .mock("GET", "/alerts/pending")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let session = Arc::new(RecordingSession::default());
        poller(&server, Arc::clone(&session)).poll_once().await;
        assert!(session.sent().is_empty());
    }
}
