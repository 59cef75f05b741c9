use std::collections::BTreeMap;

use directions::{
    DirectionsCommand, DirectionsSession, GeolocationError, Route, RouteError, SessionPhase,
};
use discovery::{
    BoundsQueryKey, DiscoveryError, DiscoverySource, RawEntry, RestaurantMapEntry,
    SearchRestaurant,
};
use geoprim::{GeoBounds, LatLng, Time};
use interaction::{PopupConfig, PopupController};
use runloop::{Notice, TaskToken};
use tracing::debug;
use viewport::{
    DebounceConfig, FitConfig, SettleOrigin, Viewport, ViewportController, ViewportSnapshot,
};

use crate::command::MapCommand;
use crate::render::{DirectionsPanel, MarkerView, RenderModel, RouteView};

/// Tuning for the whole map view.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct MapViewConfig {
    pub debounce: DebounceConfig,
    pub fit: FitConfig,
    pub popup: PopupConfig,
}

/// Composition root for the discovery map.
///
/// Owns the viewport controller, the discovery source, per-marker popup
/// controllers, and the directions session, and turns their effects into one
/// ordered [`MapCommand`] stream. Completions come back through the
/// `apply_*` methods with the command's token echoed; everything else the
/// embedder needs each frame is in [`RenderModel`].
///
/// There are no process-wide globals here: popups reach the directions flow
/// through `request_directions` on this root, nothing else.
#[derive(Debug)]
pub struct MapView {
    config: MapViewConfig,
    controller: ViewportController,
    source: DiscoverySource,
    session: DirectionsSession,
    popups: BTreeMap<String, PopupController>,
}

impl MapView {
    pub fn new(config: MapViewConfig) -> Self {
        Self {
            config,
            controller: ViewportController::new(config.debounce),
            source: DiscoverySource::new(config.fit),
            session: DirectionsSession::new(config.fit),
            popups: BTreeMap::new(),
        }
    }

    /// Reports a settled viewport from the map engine.
    ///
    /// Settles caused by `FlyTo`/`FitBounds` commands must be reported with
    /// `SettleOrigin::ProgrammaticFit` so they cannot re-trigger a query
    /// loop.
    pub fn on_map_settled(&mut self, now: Time, viewport: Viewport, origin: SettleOrigin) {
        self.controller.on_viewport_settled(now, viewport, origin);
    }

    /// Seeds the first discovery query on mount, without waiting for the
    /// debounce window.
    pub fn mount(&mut self, now: Time) -> Vec<MapCommand> {
        let Some(bounds) = self.controller.flush_immediately(now) else {
            return Vec::new();
        };
        self.issue_bounds_query(bounds).into_iter().collect()
    }

    /// Fires any due timers and returns the commands they produced.
    pub fn poll(&mut self, now: Time) -> Vec<MapCommand> {
        for popup in self.popups.values_mut() {
            popup.poll(now);
        }

        let Some(bounds) = self.controller.poll(now) else {
            return Vec::new();
        };
        self.issue_bounds_query(bounds).into_iter().collect()
    }

    /// Supplies or clears manual-search results.
    ///
    /// `Some` while the search query is non-empty (its results are
    /// authoritative and viewport querying is suspended); `None` once the
    /// query is emptied.
    pub fn set_search_results(&mut self, results: Option<&[SearchRestaurant]>) -> Vec<MapCommand> {
        self.controller.set_search_active(results.is_some());
        self.source
            .set_search_results(results)
            .map(MapCommand::from_fit)
            .into_iter()
            .collect()
    }

    /// Delivers a bounds-query completion.
    pub fn apply_discovery_result(
        &mut self,
        token: TaskToken,
        result: Result<Vec<RawEntry>, DiscoveryError>,
    ) {
        self.source.apply_query_result(token, result);
    }

    /// Starts the directions flow toward `destination`.
    pub fn request_directions(&mut self, destination: RestaurantMapEntry) -> Vec<MapCommand> {
        self.session
            .request_directions(destination)
            .into_iter()
            .map(lower_directions_command)
            .collect()
    }

    /// Delivers a geolocation completion.
    pub fn apply_location_result(
        &mut self,
        token: TaskToken,
        result: Result<LatLng, GeolocationError>,
    ) -> Vec<MapCommand> {
        self.session
            .on_location(token, result)
            .into_iter()
            .map(lower_directions_command)
            .collect()
    }

    /// Delivers a route completion.
    pub fn apply_route_result(
        &mut self,
        token: TaskToken,
        result: Result<Route, RouteError>,
    ) -> Vec<MapCommand> {
        self.session
            .on_route(token, result)
            .into_iter()
            .map(lower_directions_command)
            .collect()
    }

    /// Closes the directions panel and restores the discovery markers.
    pub fn clear_directions(&mut self) {
        self.session.clear();
    }

    pub fn marker_entered(&mut self, id: &str) {
        self.popup_mut(id).enter_marker();
    }

    pub fn marker_left(&mut self, now: Time, id: &str) {
        self.popup_mut(id).leave_marker(now);
    }

    pub fn popup_entered(&mut self, id: &str) {
        self.popup_mut(id).enter_popup();
    }

    pub fn popup_left(&mut self, now: Time, id: &str) {
        self.popup_mut(id).leave_popup(now);
    }

    pub fn marker_clicked(&mut self, id: &str) {
        self.popup_mut(id).toggle_via_click();
    }

    pub fn popup_close_clicked(&mut self, id: &str) {
        self.popup_mut(id).force_close();
    }

    /// User-visible notices accumulated since the last drain.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.session.drain_notices()
    }

    /// Center/zoom snapshot for session persistence.
    pub fn viewport_snapshot(&self) -> Option<ViewportSnapshot> {
        self.controller.snapshot()
    }

    pub fn directions_phase(&self) -> SessionPhase {
        self.session.phase()
    }

    /// Builds the frame's render model.
    pub fn render_model(&self) -> RenderModel {
        let session_busy = matches!(
            self.session.phase(),
            SessionPhase::AcquiringLocation | SessionPhase::RequestingRoute
        );
        let is_loading = self.source.is_loading() || session_busy;
        let discovery_failed = self.source.error().is_some();

        if let Some(active) = self.session.active() {
            // Route mode: everything except the endpoints is hidden.
            let markers = vec![MarkerView {
                entry: active.destination.clone(),
                popup_open: self.popup_is_open(&active.destination.id),
            }];
            return RenderModel {
                markers,
                route: Some(RouteView {
                    origin: active.user_location,
                    line: active.route.geometry.clone(),
                }),
                panel: Some(DirectionsPanel::of(active)),
                is_loading,
                discovery_failed,
                show_empty_state: false,
            };
        }

        let markers: Vec<MarkerView> = self
            .source
            .entries()
            .iter()
            .map(|entry| MarkerView {
                entry: entry.clone(),
                popup_open: self.popup_is_open(&entry.id),
            })
            .collect();
        let show_empty_state = markers.is_empty() && !is_loading && !discovery_failed;

        RenderModel {
            markers,
            route: None,
            panel: None,
            is_loading,
            discovery_failed,
            show_empty_state,
        }
    }

    /// Cancels every pending timer and marks in-flight work to-be-ignored.
    pub fn teardown(&mut self) {
        self.controller.teardown();
        self.source.teardown();
        self.session.teardown();
        for popup in self.popups.values_mut() {
            popup.teardown();
        }
    }

    fn issue_bounds_query(&mut self, bounds: GeoBounds) -> Option<MapCommand> {
        let zoom_level = self.controller.viewport()?.zoom_level();
        let key = BoundsQueryKey::new(zoom_level, bounds);
        let token = self.source.begin_bounds_query(key)?;
        debug!(?token, zoom_level, "issuing bounds query");
        Some(MapCommand::QueryBounds { token, key })
    }

    fn popup_mut(&mut self, id: &str) -> &mut PopupController {
        let popup_config = self.config.popup;
        self.popups
            .entry(id.to_owned())
            .or_insert_with(|| PopupController::new(popup_config))
    }

    fn popup_is_open(&self, id: &str) -> bool {
        self.popups.get(id).is_some_and(|p| p.is_open())
    }
}

fn lower_directions_command(command: DirectionsCommand) -> MapCommand {
    match command {
        DirectionsCommand::AcquireLocation { token } => MapCommand::AcquireLocation { token },
        DirectionsCommand::RequestRoute {
            token,
            origin,
            destination,
        } => MapCommand::RequestRoute {
            token,
            origin,
            destination,
        },
        DirectionsCommand::FitViewport(decision) => MapCommand::from_fit(decision),
    }
}
