use thiserror::Error;

/// Failure of a bounds query against the discovery backend.
///
/// Surfaced as an inline "could not load restaurants" state with an empty
/// result set; it never throws into the render path and does not block
/// retries on subsequent pans.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    #[error("discovery service error: {0}")]
    Service(String),
    #[error("discovery request timed out")]
    Timeout,
}
