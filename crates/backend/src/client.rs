//! The backend client proper.

use std::time::Duration;

use {
    serde::Deserialize,
    tracing::{debug, info},
    url::Url,
};

use chacra_messages::{AgentRequest, AgentResponse, AlertId, PendingAlert};

use crate::error::{Error, Result};

/// Fixed timeout applied to every backend call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the agent backend's HTTP surface.
///
/// Stateless per call; one instance is shared by the webhook handlers,
/// the bridge inbound handler, and the alert poller.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
}

#[derive(Debug, Default, Deserialize)]
struct PendingAlertsBody {
    // Absent array → no pending alerts.
    #[serde(default)]
    alerts: Vec<PendingAlert>,
}

impl BackendClient {
    pub fn new(base_url: Url) -> Result<Self> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: Url, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Unreachable)?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    /// Submit a canonical request to `POST {base}/agent`.
    pub async fn submit_message(&self, request: &AgentRequest) -> Result<AgentResponse> {
        debug!(phone = %request.phone, role = ?request.role, "submitting message to agent");

        let resp = self
            .http
            .post(self.endpoint("/agent"))
            .json(request)
            .send()
            .await
            .map_err(Error::Unreachable)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status { status });
        }

        resp.json().await.map_err(Error::Malformed)
    }

    /// Fetch alerts awaiting delivery from `GET {base}/alerts/pending`.
    ///
    /// Returns an empty vec when none are pending, never an error for
    /// an absent `alerts` array.
    pub async fn fetch_pending_alerts(&self) -> Result<Vec<PendingAlert>> {
        let resp = self
            .http
            .get(self.endpoint("/alerts/pending"))
            .send()
            .await
            .map_err(Error::Unreachable)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status { status });
        }

        let body: PendingAlertsBody = resp.json().await.map_err(Error::Malformed)?;
        Ok(body.alerts)
    }

    /// Confirm delivery via `POST {base}/alerts/{id}/sent`.
    ///
    /// Any 2xx is success. Failure leaves the alert pending server-side
    /// and is non-fatal to the caller.
    pub async fn acknowledge_alert_sent(&self, id: &AlertId) -> Result<()> {
        let resp = self
            .http
            .post(self.endpoint(&format!("/alerts/{id}/sent")))
            .send()
            .await
            .map_err(Error::Unreachable)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status { status });
        }

        info!(alert_id = %id, "alert acknowledged");
        Ok(())
    }
}
