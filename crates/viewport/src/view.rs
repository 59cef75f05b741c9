use geoprim::{GeoBounds, LatLng};
use serde::{Deserialize, Serialize};

/// The map's visible geographic window.
///
/// `bounds` is always taken from the live map engine state at settle time;
/// it is never derived locally, so it can be stale by at most one debounce
/// interval.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: f64,
    pub bounds: GeoBounds,
}

impl Viewport {
    pub fn new(center: LatLng, zoom: f64, bounds: GeoBounds) -> Self {
        Self {
            center,
            zoom,
            bounds,
        }
    }

    /// Zoom level rounded for use in a bounds-query key.
    pub fn zoom_level(&self) -> u8 {
        self.zoom.round().clamp(0.0, 24.0) as u8
    }
}

/// Where a viewport-settled event came from.
///
/// Programmatic fits are terminal: they must never re-trigger a discovery
/// refresh, so the event source has to keep them distinguishable from
/// organic pans even if the underlying map engine conflates them.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SettleOrigin {
    UserGesture,
    ProgrammaticFit,
}

/// Persistable center/zoom snapshot for session restore.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportSnapshot {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: f64,
}

impl ViewportSnapshot {
    pub fn of(viewport: &Viewport) -> Self {
        Self {
            center_lat: viewport.center.lat,
            center_lng: viewport.center.lng,
            zoom: viewport.zoom,
        }
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(self.center_lat, self.center_lng)
    }
}
