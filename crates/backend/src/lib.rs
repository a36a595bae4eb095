//! HTTP client for the agent backend.
//!
//! Wraps the three backend contracts (submit message, fetch pending
//! alerts, acknowledge delivery) behind one interface with a fixed
//! request timeout so a slow backend can never hang the relay.

pub mod client;
pub mod error;

pub use {
    client::{BackendClient, REQUEST_TIMEOUT},
    error::{Error, Result},
};
