use geoprim::{GeoBounds, LatLng};
use viewport::Viewport;

use crate::command::MapCommand;

/// Options for a programmatic viewport move.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FitOptions {
    pub padding_px: u32,
    pub max_zoom: f64,
    pub duration_ms: u32,
}

/// The third-party map rendering engine, at its interface boundary.
///
/// The core never reimplements rendering; it only reads the live viewport
/// and issues fit/fly moves through this seam.
pub trait MapEngine {
    fn viewport(&self) -> Viewport;
    fn fly_to(&mut self, center: LatLng, zoom: f64, duration_ms: u32);
    fn fit_bounds(&mut self, bounds: GeoBounds, options: FitOptions);
}

/// Applies an engine-targeted command.
///
/// Returns `false` for service commands, which the embedder must start
/// itself (network, geolocation).
pub fn apply_engine_command(engine: &mut dyn MapEngine, command: &MapCommand) -> bool {
    match command {
        MapCommand::FlyTo {
            center,
            zoom,
            duration_ms,
        } => {
            engine.fly_to(*center, *zoom, *duration_ms);
            true
        }
        MapCommand::FitBounds { bounds, options } => {
            engine.fit_bounds(*bounds, *options);
            true
        }
        MapCommand::QueryBounds { .. }
        | MapCommand::AcquireLocation { .. }
        | MapCommand::RequestRoute { .. } => false,
    }
}
