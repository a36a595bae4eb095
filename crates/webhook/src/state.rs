use std::sync::Arc;

use secrecy::Secret;

use chacra_backend::BackendClient;

/// Shared, immutable webhook configuration.
///
/// `backend` stays `None` when no backend URL was configured; the
/// delivery handler surfaces that as HTTP 500 per request instead of
/// refusing to start.
#[derive(Clone)]
pub struct WebhookState {
    backend: Option<Arc<BackendClient>>,
    pub verify_token: Secret<String>,
    pub app_secret: Option<Secret<String>>,
    /// Role tag applied when the inbound message carries none.
    pub default_role: String,
}

impl WebhookState {
    pub fn new(
        backend: Option<Arc<BackendClient>>,
        verify_token: impl Into<String>,
        default_role: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            verify_token: Secret::new(verify_token.into()),
            app_secret: None,
            default_role: default_role.into(),
        }
    }

    /// Enable `X-Hub-Signature-256` validation of POST bodies.
    #[must_use]
    pub fn with_app_secret(mut self, app_secret: impl Into<String>) -> Self {
        self.app_secret = Some(Secret::new(app_secret.into()));
        self
    }

    /// The configured backend, or [`chacra_backend::Error::Configuration`]
    /// when no backend URL was provided.
    pub fn backend(&self) -> chacra_backend::Result<&Arc<BackendClient>> {
        self.backend
            .as_ref()
            .ok_or(chacra_backend::Error::Configuration)
    }
}

impl std::fmt::Debug for WebhookState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookState")
            .field("backend", &self.backend.as_ref().map(|b| b.base_url().as_str()))
            .field("verify_token", &"[REDACTED]")
            .field("app_secret", &self.app_secret.as_ref().map(|_| "[REDACTED]"))
            .field("default_role", &self.default_role)
            .finish()
    }
}
