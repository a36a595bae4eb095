use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Network failure or request timeout. Timeouts are not
    /// distinguished from connection errors; both are retried on the
    /// next natural trigger.
    #[error("backend unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("backend returned HTTP {status}")]
    Status { status: reqwest::StatusCode },

    /// The backend answered 2xx but the body did not decode.
    #[error("malformed backend response: {0}")]
    Malformed(#[source] reqwest::Error),

    /// No backend URL is configured.
    #[error("backend URL not configured")]
    Configuration,
}

pub type Result<T> = std::result::Result<T, Error>;
