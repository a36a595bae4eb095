//! Long-running bridge between a chat session and the backend.
//!
//! The session transport (QR pairing, reconnects, wire encoding) is an
//! external collaborator behind [`ChatSession`]; this crate owns the
//! relay semantics: forward each inbound message once and always reply,
//! and deliver pending backend alerts with at-least-once semantics.

pub mod inbound;
pub mod poller;
pub mod runner;
pub mod session;

#[cfg(test)]
pub(crate) mod testutil;

pub use {
    inbound::{ERROR_FALLBACK, InboundHandler},
    poller::{AlertPoller, DEFAULT_POLL_INTERVAL},
    runner::Bridge,
    session::ChatSession,
};
