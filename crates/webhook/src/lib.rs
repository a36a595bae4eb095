//! Push-path webhook surface.
//!
//! An externally-hosted HTTP endpoint that receives provider-pushed
//! notifications and forwards them to the backend within the same
//! request/response cycle. Each invocation is stateless and
//! independent; the computed agent reply is returned to the HTTP
//! caller, not delivered to the chat user (known capability gap — the
//! push path has no outbound session).

pub mod routes;
pub mod signature;
pub mod state;

pub use {routes::webhook_router, state::WebhookState};
