use directions::{GeolocationError, RouteError, RouteResponse};
use discovery::{BoundsQueryKey, DiscoveryError, RawEntry};
use geoprim::LatLng;

use crate::command::MapCommand;
use crate::view::MapView;

/// Browser geolocation at its interface boundary.
pub trait GeolocationProvider {
    fn current_position(&mut self) -> Result<LatLng, GeolocationError>;
}

/// The restaurant discovery backend at its interface boundary.
///
/// Must tolerate being called at high frequency; debouncing is the caller's
/// responsibility, not the service's.
pub trait DiscoveryService {
    fn query_by_bounds(&mut self, key: BoundsQueryKey) -> Result<Vec<RawEntry>, DiscoveryError>;
}

/// The turn-by-turn routing service at its interface boundary.
pub trait RoutingService {
    fn route(
        &mut self,
        origin: LatLng,
        destination: LatLng,
    ) -> Result<RouteResponse, RouteError>;
}

/// The external collaborators a synchronous embedder wires in.
pub struct Services<'a> {
    pub geolocation: &'a mut dyn GeolocationProvider,
    pub discovery: &'a mut dyn DiscoveryService,
    pub routing: &'a mut dyn RoutingService,
}

/// Executes one service command and feeds the completion straight back.
///
/// Returns the follow-up commands the completion produced (a geolocation
/// success, for example, continues into the route request). Engine commands
/// are returned unchanged for the embedder to apply via
/// [`apply_engine_command`].
///
/// [`apply_engine_command`]: crate::engine::apply_engine_command
pub fn dispatch_service_command(
    view: &mut MapView,
    services: &mut Services<'_>,
    command: MapCommand,
) -> Vec<MapCommand> {
    match command {
        MapCommand::QueryBounds { token, key } => {
            let result = services.discovery.query_by_bounds(key);
            view.apply_discovery_result(token, result);
            Vec::new()
        }
        MapCommand::AcquireLocation { token } => {
            let result = services.geolocation.current_position();
            view.apply_location_result(token, result)
        }
        MapCommand::RequestRoute {
            token,
            origin,
            destination,
        } => {
            let result = services
                .routing
                .route(origin, destination)
                .and_then(RouteResponse::validate);
            view.apply_route_result(token, result)
        }
        engine_command => vec![engine_command],
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DiscoveryService, GeolocationProvider, RoutingService, Services, dispatch_service_command,
    };
    use crate::command::MapCommand;
    use crate::view::{MapView, MapViewConfig};
    use directions::{GeolocationError, RouteError, RouteResponse};
    use discovery::{BoundsQueryKey, DiscoveryError, RawEntry, RestaurantMapEntry};
    use geoprim::{GeoBounds, LatLng, Time};
    use viewport::{SettleOrigin, Viewport};

    struct FixedLocation(Result<LatLng, GeolocationError>);

    impl GeolocationProvider for FixedLocation {
        fn current_position(&mut self) -> Result<LatLng, GeolocationError> {
            self.0.clone()
        }
    }

    struct CannedDiscovery(Vec<RawEntry>);

    impl DiscoveryService for CannedDiscovery {
        fn query_by_bounds(
            &mut self,
            _key: BoundsQueryKey,
        ) -> Result<Vec<RawEntry>, DiscoveryError> {
            Ok(self.0.clone())
        }
    }

    struct CannedRoute(Result<RouteResponse, RouteError>);

    impl RoutingService for CannedRoute {
        fn route(
            &mut self,
            _origin: LatLng,
            _destination: LatLng,
        ) -> Result<RouteResponse, RouteError> {
            self.0.clone()
        }
    }

    fn entry(id: &str, lat: f64, lng: f64) -> RestaurantMapEntry {
        RestaurantMapEntry {
            id: id.into(),
            name: format!("Restaurant {id}"),
            address: String::new(),
            photo: None,
            coordinates: LatLng::new(lat, lng),
            rating: None,
            review_count: None,
        }
    }

    #[test]
    fn synchronous_host_runs_the_whole_directions_pipeline() {
        let mut view = MapView::new(MapViewConfig::default());
        let mut geolocation = FixedLocation(Ok(LatLng::new(16.00, 108.20)));
        let mut discovery = CannedDiscovery(Vec::new());
        let response: RouteResponse = serde_json::from_str(
            r#"{
                "distanceMeters": 900.0,
                "durationSeconds": 180.0,
                "geometry": [
                    {"lat": 16.00, "lng": 108.20},
                    {"lat": 16.06, "lng": 108.22}
                ]
            }"#,
        )
        .expect("payload parses");
        let mut routing = CannedRoute(Ok(response));
        let mut services = Services {
            geolocation: &mut geolocation,
            discovery: &mut discovery,
            routing: &mut routing,
        };

        let mut queue = view.request_directions(entry("a", 16.06, 108.22));
        while let Some(command) = queue.pop() {
            let follow_ups = dispatch_service_command(&mut view, &mut services, command);
            for follow_up in follow_ups {
                match follow_up {
                    MapCommand::FitBounds { .. } | MapCommand::FlyTo { .. } => {}
                    other => queue.push(other),
                }
            }
        }

        let model = view.render_model();
        assert!(model.route.is_some());
        assert_eq!(model.panel.unwrap().distance_label, "900 m");
    }

    #[test]
    fn discovery_completion_lands_in_the_marker_set() {
        let mut view = MapView::new(MapViewConfig::default());
        let bounds = GeoBounds::new(16.05, 16.07, 108.21, 108.24);
        view.on_map_settled(
            Time(0.0),
            Viewport::new(bounds.center(), 16.0, bounds),
            SettleOrigin::UserGesture,
        );

        let payload: Vec<RawEntry> = serde_json::from_str(
            r#"[{"id": "a", "name": "A", "latitude": 16.06, "longitude": 108.22}]"#,
        )
        .expect("payload parses");
        let mut geolocation = FixedLocation(Err(GeolocationError::Unsupported));
        let mut discovery = CannedDiscovery(payload);
        let mut routing = CannedRoute(Err(RouteError::Timeout));
        let mut services = Services {
            geolocation: &mut geolocation,
            discovery: &mut discovery,
            routing: &mut routing,
        };

        for command in view.poll(Time(0.6)) {
            dispatch_service_command(&mut view, &mut services, command);
        }
        assert_eq!(view.render_model().markers.len(), 1);
    }
}
