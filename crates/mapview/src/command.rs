use discovery::BoundsQueryKey;
use geoprim::{GeoBounds, LatLng};
use runloop::TaskToken;
use viewport::FitDecision;

use crate::engine::FitOptions;

/// One ordered unit of work for the embedder.
///
/// Service commands (`QueryBounds`, `AcquireLocation`, `RequestRoute`) start
/// asynchronous work whose completion must be delivered back to [`MapView`]
/// with the token echoed. Engine commands (`FlyTo`, `FitBounds`) move the
/// viewport and are terminal: the resulting settle event must be reported
/// with `SettleOrigin::ProgrammaticFit`.
///
/// [`MapView`]: crate::view::MapView
#[derive(Debug, Clone, PartialEq)]
pub enum MapCommand {
    QueryBounds {
        token: TaskToken,
        key: BoundsQueryKey,
    },
    AcquireLocation {
        token: TaskToken,
    },
    RequestRoute {
        token: TaskToken,
        origin: LatLng,
        destination: LatLng,
    },
    FlyTo {
        center: LatLng,
        zoom: f64,
        duration_ms: u32,
    },
    FitBounds {
        bounds: GeoBounds,
        options: FitOptions,
    },
}

impl MapCommand {
    /// Lowers a fit decision into an engine command.
    pub fn from_fit(decision: FitDecision) -> Self {
        match decision {
            FitDecision::FlyTo {
                center,
                zoom,
                duration_ms,
            } => MapCommand::FlyTo {
                center,
                zoom,
                duration_ms,
            },
            FitDecision::FitBounds {
                bounds,
                padding_px,
                max_zoom,
                duration_ms,
            } => MapCommand::FitBounds {
                bounds,
                options: FitOptions {
                    padding_px,
                    max_zoom,
                    duration_ms,
                },
            },
        }
    }
}
