use thiserror::Error;

/// Failure to acquire the user's position.
///
/// Recovered locally: a dismissible notice is surfaced and the directions
/// flow returns to idle. The session never proceeds with a stale or default
/// location.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("geolocation is not supported on this device")]
    Unsupported,
    #[error("timed out waiting for a location fix")]
    Timeout,
}

/// Failure of a route request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("routing service error: {0}")]
    Service(String),
    #[error("route request timed out")]
    Timeout,
    #[error("route response had fewer than two usable geometry points")]
    MalformedGeometry,
}
