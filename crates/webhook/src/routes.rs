//! Webhook HTTP handlers.

use {
    axum::{
        Json, Router,
        body::Bytes,
        extract::{Query, State},
        http::{HeaderMap, StatusCode},
        response::{IntoResponse, Response},
        routing::get,
    },
    secrecy::ExposeSecret,
    serde::{Deserialize, Serialize},
    tracing::{debug, warn},
};

use chacra_messages::InboundMessage;

use crate::state::WebhookState;

/// Subscription verification parameters, as sent by the provider.
#[derive(Debug, Deserialize)]
struct VerifyParams {
    #[serde(rename = "hub.mode")]
    mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    challenge: Option<String>,
}

#[derive(Debug, Serialize)]
struct ReceiveResponse {
    success: bool,
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    agent_response: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Challenge-response subscription check.
///
/// Succeeds iff `mode` is the fixed subscribe marker and `token`
/// matches the configured secret. Pure — no backend interaction.
/// A request with a matching token but no challenge is rejected
/// rather than answered with an empty 200.
fn verify_subscription(
    mode: Option<&str>,
    token: Option<&str>,
    challenge: Option<&str>,
    verify_token: &str,
) -> Option<String> {
    let mode = mode?;
    let token = token?;
    let challenge = challenge?;

    if mode == "subscribe" && token == verify_token {
        Some(challenge.to_string())
    } else {
        None
    }
}

/// `GET /webhook` — provider subscription verification.
async fn verify_handler(
    State(state): State<WebhookState>,
    Query(params): Query<VerifyParams>,
) -> Response {
    match verify_subscription(
        params.mode.as_deref(),
        params.verify_token.as_deref(),
        params.challenge.as_deref(),
        state.verify_token.expose_secret(),
    ) {
        Some(challenge) => {
            debug!("webhook subscription verified");
            (StatusCode::OK, challenge).into_response()
        },
        None => {
            warn!(mode = ?params.mode, "webhook verification rejected");
            (StatusCode::FORBIDDEN, "Forbidden").into_response()
        },
    }
}

/// `POST /webhook` — provider-pushed message delivery.
///
/// Forwards the extracted message to the backend within this
/// request/response cycle and returns the agent's reply text to the
/// HTTP caller. Payloads without a message (status updates, receipts,
/// unparseable bodies) are acknowledged without any backend call.
async fn receive_handler(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(ref app_secret) = state.app_secret {
        let signature = headers
            .get("x-hub-signature-256")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !crate::signature::verify_signature(&body, signature, app_secret.expose_secret()) {
            warn!("webhook signature validation failed");
            return (
                StatusCode::FORBIDDEN,
                Json(ErrorResponse {
                    error: "Invalid signature",
                    message: None,
                }),
            )
                .into_response();
        }
    }

    let payload: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            // Malformed payloads are acknowledged, not failed.
            debug!(error = %e, "unparseable webhook body, acknowledging");
            return event_received();
        },
    };

    let Some(message) = InboundMessage::from_webhook(&payload) else {
        return event_received();
    };

    let request = message.to_request(Some(&state.default_role));
    let result = match state.backend() {
        Ok(backend) => {
            debug!(sender = %message.sender_id, "forwarding webhook message to backend");
            backend.submit_message(&request).await
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(response) => (
            StatusCode::OK,
            Json(ReceiveResponse {
                success: true,
                message: "Message forwarded to backend",
                agent_response: response.reply_text().map(str::to_string),
            }),
        )
            .into_response(),
        Err(e @ chacra_backend::Error::Configuration) => {
            warn!(error = %e, "webhook received a message but cannot forward it");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Backend URL not configured",
                    message: None,
                }),
            )
                .into_response()
        },
        Err(e) => {
            warn!(error = %e, "backend call failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error",
                    message: Some(e.to_string()),
                }),
            )
                .into_response()
        },
    }
}

fn event_received() -> Response {
    (
        StatusCode::OK,
        Json(ReceiveResponse {
            success: true,
            message: "Event received",
            agent_response: None,
        }),
    )
        .into_response()
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: "Method not allowed",
            message: None,
        }),
    )
        .into_response()
}

/// Create the webhook router.
pub fn webhook_router() -> Router<WebhookState> {
    Router::new().route(
        "/webhook",
        get(verify_handler)
            .post(receive_handler)
            .fallback(method_not_allowed),
    )
}
