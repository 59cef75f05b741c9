use geoprim::LatLng;
use serde::Deserialize;

use crate::error::RouteError;

/// One turn-by-turn step.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub maneuver: String,
    pub modifier: Option<String>,
    pub text: String,
    pub distance_m: f64,
}

/// A computed route from the user's location to a destination.
///
/// Invariant: `geometry` is ordered origin-to-destination and holds at least
/// two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub geometry: Vec<LatLng>,
    pub distance_m: f64,
    pub duration_s: f64,
    pub instructions: Vec<Instruction>,
}

/// Geometry point as the routing service encodes it.
#[derive(Debug, Copy, Clone, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInstruction {
    pub maneuver_type: String,
    #[serde(default)]
    pub modifier: Option<String>,
    pub text: String,
    pub distance_meters: f64,
}

/// Routing service response payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub geometry: Vec<GeoPoint>,
    #[serde(default)]
    pub instructions: Vec<RawInstruction>,
}

impl RouteResponse {
    /// Validates the payload into a [`Route`].
    ///
    /// Out-of-range geometry points are dropped; fewer than two surviving
    /// points is a malformed route.
    pub fn validate(self) -> Result<Route, RouteError> {
        let geometry: Vec<LatLng> = self
            .geometry
            .iter()
            .map(|p| LatLng::new(p.lat, p.lng))
            .filter(|p| p.is_valid())
            .collect();
        if geometry.len() < 2 {
            return Err(RouteError::MalformedGeometry);
        }

        let instructions = self
            .instructions
            .into_iter()
            .map(|raw| Instruction {
                maneuver: raw.maneuver_type,
                modifier: raw.modifier,
                text: raw.text,
                distance_m: raw.distance_meters,
            })
            .collect();

        Ok(Route {
            geometry,
            distance_m: self.distance_meters,
            duration_s: self.duration_seconds,
            instructions,
        })
    }
}
