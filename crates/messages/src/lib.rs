//! Canonical message model for the chacra relay.
//!
//! Both entry paths (webhook push and session bridge) normalize their
//! provider payloads into [`InboundMessage`] and talk to the backend in
//! terms of [`AgentRequest`] / [`AgentResponse`]. Backend-originated
//! notifications surface as [`PendingAlert`].

pub mod agent;
pub mod alert;
pub mod inbound;

pub use {
    agent::{AgentRequest, AgentResponse, NO_REPLY_FALLBACK},
    alert::{AlertId, PendingAlert},
    inbound::InboundMessage,
};
