use discovery::RestaurantMapEntry;
use geoprim::LatLng;
use runloop::{Metrics, Notice, NoticeBus, NoticeSeverity, TaskSlot, TaskToken};
use tracing::{debug, info, warn};
use viewport::{FitConfig, fit_route};

use crate::error::{GeolocationError, RouteError};
use crate::route::Route;

/// Where the directions flow currently is.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    AcquiringLocation,
    RequestingRoute,
    Active,
}

/// Asynchronous work the embedder must start on the session's behalf.
///
/// Completions come back through `on_location` / `on_route` with the token
/// echoed; the token gate is what makes superseded requests harmless.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectionsCommand {
    AcquireLocation {
        token: TaskToken,
    },
    RequestRoute {
        token: TaskToken,
        origin: LatLng,
        destination: LatLng,
    },
    FitViewport(viewport::FitDecision),
}

/// A route currently rendered on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveRoute {
    pub user_location: LatLng,
    pub destination: RestaurantMapEntry,
    pub route: Route,
}

/// Orchestrates geolocate → route request → active route → clear.
///
/// Contract:
/// - A request with no known location acquires one first; the location
///   completion is an explicit continuation that immediately issues the
///   route request for the stored destination (never a timed retry).
/// - Issuing a new request supersedes the in-flight one; the superseded
///   completion is ignored when it eventually resolves.
/// - A failed route request surfaces a notice and leaves a previously
///   active route untouched; only a successful route or `clear` replaces it.
#[derive(Debug)]
pub struct DirectionsSession {
    fit_config: FitConfig,
    phase: SessionPhase,
    user_location: Option<LatLng>,
    pending_destination: Option<RestaurantMapEntry>,
    active: Option<ActiveRoute>,
    location_slot: TaskSlot,
    route_slot: TaskSlot,
    notices: NoticeBus,
    metrics: Metrics,
}

impl DirectionsSession {
    pub fn new(fit_config: FitConfig) -> Self {
        Self {
            fit_config,
            phase: SessionPhase::Idle,
            user_location: None,
            pending_destination: None,
            active: None,
            location_slot: TaskSlot::new(),
            route_slot: TaskSlot::new(),
            notices: NoticeBus::new(),
            metrics: Metrics::new(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn active(&self) -> Option<&ActiveRoute> {
        self.active.as_ref()
    }

    pub fn user_location(&self) -> Option<LatLng> {
        self.user_location
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    /// Starts (or restarts) the directions flow toward `destination`.
    ///
    /// Selecting a different restaurant while a route is active or in flight
    /// implicitly replaces the previous target.
    pub fn request_directions(&mut self, destination: RestaurantMapEntry) -> Vec<DirectionsCommand> {
        self.metrics.inc("routes_requested");
        let target = destination.coordinates;
        self.pending_destination = Some(destination);

        match self.user_location {
            Some(origin) => vec![self.issue_route_request(origin, target)],
            None => {
                self.phase = SessionPhase::AcquiringLocation;
                let token = self.location_slot.begin();
                debug!(?token, "acquiring user location");
                vec![DirectionsCommand::AcquireLocation { token }]
            }
        }
    }

    /// Geolocation completion.
    ///
    /// A success continues straight into the route request for the stored
    /// destination. A failure surfaces a notice and returns to idle; the
    /// session never falls back to a stale or default position.
    pub fn on_location(
        &mut self,
        token: TaskToken,
        result: Result<LatLng, GeolocationError>,
    ) -> Vec<DirectionsCommand> {
        if !self.location_slot.try_complete(token) {
            debug!(?token, "ignoring superseded geolocation result");
            return Vec::new();
        }

        match result {
            Ok(position) if position.is_valid() => {
                self.user_location = Some(position);
                match self.pending_destination.as_ref().map(|d| d.coordinates) {
                    Some(target) => vec![self.issue_route_request(position, target)],
                    None => {
                        self.settle_phase();
                        Vec::new()
                    }
                }
            }
            Ok(position) => {
                warn!(?position, "geolocation produced an out-of-range position");
                self.fail_location(GeolocationError::Unsupported)
            }
            Err(err) => self.fail_location(err),
        }
    }

    /// Route completion.
    ///
    /// Stale tokens are ignored entirely, so an out-of-order resolution can
    /// never overwrite the newer request's outcome.
    pub fn on_route(
        &mut self,
        token: TaskToken,
        result: Result<Route, RouteError>,
    ) -> Vec<DirectionsCommand> {
        if !self.route_slot.try_complete(token) {
            self.metrics.inc("stale_routes_ignored");
            debug!(?token, "ignoring superseded route result");
            return Vec::new();
        }

        match result {
            Ok(route) => {
                let (Some(destination), Some(user_location)) =
                    (self.pending_destination.take(), self.user_location)
                else {
                    // No pending destination to activate.
                    self.settle_phase();
                    return Vec::new();
                };

                info!(
                    destination = %destination.name,
                    distance_m = route.distance_m,
                    "route active"
                );
                let fit = fit_route(user_location, &route.geometry, &self.fit_config);
                self.active = Some(ActiveRoute {
                    user_location,
                    destination,
                    route,
                });
                self.phase = SessionPhase::Active;
                fit.map(DirectionsCommand::FitViewport).into_iter().collect()
            }
            Err(err) => {
                warn!(%err, "route request failed");
                self.metrics.inc("route_requests_failed");
                self.notices.emit(
                    NoticeSeverity::Warning,
                    "route_request_failed",
                    "Could not load directions. Please try again.",
                );
                self.pending_destination = None;
                // A still-valid prior route is preserved.
                self.settle_phase();
                Vec::new()
            }
        }
    }

    /// Discards the active route and returns to idle.
    ///
    /// Always succeeds synchronously; in-flight work is marked
    /// to-be-ignored. Marker visibility is derived from the session phase,
    /// so hidden markers reappear on the next render.
    pub fn clear(&mut self) {
        self.active = None;
        self.pending_destination = None;
        self.location_slot.cancel();
        self.route_slot.cancel();
        self.phase = SessionPhase::Idle;
    }

    /// Marks in-flight work as to-be-ignored on component disposal.
    pub fn teardown(&mut self) {
        self.location_slot.cancel();
        self.route_slot.cancel();
    }

    fn issue_route_request(&mut self, origin: LatLng, destination: LatLng) -> DirectionsCommand {
        self.phase = SessionPhase::RequestingRoute;
        let token = self.route_slot.begin();
        debug!(?token, "requesting route");
        DirectionsCommand::RequestRoute {
            token,
            origin,
            destination,
        }
    }

    fn fail_location(&mut self, err: GeolocationError) -> Vec<DirectionsCommand> {
        self.metrics.inc("location_failures");
        let message = match err {
            GeolocationError::PermissionDenied => {
                "Location permission denied. Allow location access to get directions."
            }
            GeolocationError::Unsupported => "Location is not available on this device.",
            GeolocationError::Timeout => "Could not determine your location in time.",
        };
        self.notices
            .emit(NoticeSeverity::Error, "location_unavailable", message);
        self.pending_destination = None;
        self.settle_phase();
        Vec::new()
    }

    /// Phase after a terminal completion: active route wins, else idle.
    fn settle_phase(&mut self) {
        self.phase = if self.active.is_some() {
            SessionPhase::Active
        } else {
            SessionPhase::Idle
        };
    }
}
