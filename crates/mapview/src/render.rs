use directions::{ActiveRoute, ManeuverIcon, format_distance, format_duration, icon_for};
use discovery::RestaurantMapEntry;
use geoprim::LatLng;

/// One marker ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub entry: RestaurantMapEntry,
    pub popup_open: bool,
}

/// The active route's drawable geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteView {
    pub origin: LatLng,
    pub line: Vec<LatLng>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepView {
    /// 1-based position in the instruction list.
    pub index: usize,
    pub icon: ManeuverIcon,
    pub text: String,
    pub distance_label: String,
}

/// The directions panel, present only while a route is active.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsPanel {
    pub destination_name: String,
    pub distance_label: String,
    pub duration_label: String,
    pub steps: Vec<StepView>,
}

impl DirectionsPanel {
    pub fn of(active: &ActiveRoute) -> Self {
        Self {
            destination_name: active.destination.name.clone(),
            distance_label: format_distance(active.route.distance_m),
            duration_label: format_duration(active.route.duration_s),
            steps: active
                .route
                .instructions
                .iter()
                .enumerate()
                .map(|(i, step)| StepView {
                    index: i + 1,
                    icon: icon_for(&step.maneuver, step.modifier.as_deref()),
                    text: step.text.clone(),
                    distance_label: format_distance(step.distance_m),
                })
                .collect(),
        }
    }
}

/// Everything the embedder needs to draw one frame of the map UI.
///
/// While a route is active only the origin, the destination marker, and the
/// route line render; the discovery marker set reappears once the session
/// clears.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel {
    pub markers: Vec<MarkerView>,
    pub route: Option<RouteView>,
    pub panel: Option<DirectionsPanel>,
    pub is_loading: bool,
    pub discovery_failed: bool,
    pub show_empty_state: bool,
}
