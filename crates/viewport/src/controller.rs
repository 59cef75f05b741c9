use geoprim::{GeoBounds, Time};
use runloop::DelayTimer;

use crate::view::{SettleOrigin, Viewport, ViewportSnapshot};

/// Tuning for viewport-driven discovery refreshes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DebounceConfig {
    /// Trailing-debounce window after the last settle event (seconds).
    pub refresh_delay_s: f64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            refresh_delay_s: 0.5,
        }
    }
}

/// Tracks the map engine's true viewport and emits a debounced
/// "bounds changed" refresh for discovery queries.
///
/// Guarantees:
/// - The stored center/zoom always track the latest settle event, even while
///   refreshes are suppressed (persistence/restore keeps working).
/// - At most one refresh is pending at any time; every new user-gesture
///   settle replaces the previously scheduled one, so only the last viewport
///   within the window triggers a query.
/// - No refresh is ever scheduled while a manual search is active, or for a
///   programmatic-fit settle.
#[derive(Debug)]
pub struct ViewportController {
    config: DebounceConfig,
    viewport: Option<Viewport>,
    search_active: bool,
    refresh: DelayTimer,
}

impl ViewportController {
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            viewport: None,
            search_active: false,
            refresh: DelayTimer::new(),
        }
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    pub fn snapshot(&self) -> Option<ViewportSnapshot> {
        self.viewport.as_ref().map(ViewportSnapshot::of)
    }

    pub fn has_pending_refresh(&self) -> bool {
        self.refresh.is_pending()
    }

    /// Toggles manual-search suppression.
    ///
    /// Entering search cancels any scheduled refresh so a pre-search pan
    /// cannot fire into the search results.
    pub fn set_search_active(&mut self, active: bool) {
        self.search_active = active;
        if active {
            self.refresh.cancel();
        }
    }

    pub fn search_active(&self) -> bool {
        self.search_active
    }

    /// Called by the map engine on each pan/zoom-end.
    pub fn on_viewport_settled(&mut self, now: Time, viewport: Viewport, origin: SettleOrigin) {
        self.viewport = Some(viewport);

        if origin != SettleOrigin::UserGesture || self.search_active {
            return;
        }
        self.refresh.schedule(now, self.config.refresh_delay_s);
    }

    /// Seeds the first query on mount without waiting for a user gesture.
    ///
    /// Cancels any pending refresh so the seed query cannot be duplicated.
    pub fn flush_immediately(&mut self, _now: Time) -> Option<GeoBounds> {
        self.refresh.cancel();
        if self.search_active {
            return None;
        }
        self.viewport.map(|v| v.bounds)
    }

    /// Emits the debounced bounds once the window has elapsed.
    pub fn poll(&mut self, now: Time) -> Option<GeoBounds> {
        if !self.refresh.fire_if_due(now) {
            return None;
        }
        self.viewport.map(|v| v.bounds)
    }

    /// Cancels any pending refresh on component disposal.
    pub fn teardown(&mut self) {
        self.refresh.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::{DebounceConfig, ViewportController};
    use crate::view::{SettleOrigin, Viewport};
    use geoprim::{GeoBounds, LatLng, Time};

    fn viewport(min_lat: f64) -> Viewport {
        let bounds = GeoBounds::new(min_lat, min_lat + 0.02, 108.21, 108.24);
        Viewport::new(bounds.center(), 16.0, bounds)
    }

    fn controller() -> ViewportController {
        ViewportController::new(DebounceConfig::default())
    }

    #[test]
    fn burst_of_settles_yields_one_refresh_with_last_bounds() {
        let mut c = controller();
        c.on_viewport_settled(Time(0.0), viewport(16.01), SettleOrigin::UserGesture);
        c.on_viewport_settled(Time(0.1), viewport(16.02), SettleOrigin::UserGesture);
        c.on_viewport_settled(Time(0.2), viewport(16.05), SettleOrigin::UserGesture);

        // First deadline would have been at 0.5; it was replaced.
        assert_eq!(c.poll(Time(0.5)), None);

        let bounds = c.poll(Time(0.7)).expect("debounce elapsed");
        assert_eq!(bounds.min_lat, 16.05);
        assert_eq!(c.poll(Time(0.8)), None);
    }

    #[test]
    fn no_refresh_while_search_is_active() {
        let mut c = controller();
        c.set_search_active(true);
        c.on_viewport_settled(Time(0.0), viewport(16.01), SettleOrigin::UserGesture);
        assert_eq!(c.poll(Time(10.0)), None);

        // Center/zoom are still tracked for persistence.
        assert_eq!(c.snapshot().unwrap().zoom, 16.0);
    }

    #[test]
    fn entering_search_cancels_a_scheduled_refresh() {
        let mut c = controller();
        c.on_viewport_settled(Time(0.0), viewport(16.01), SettleOrigin::UserGesture);
        c.set_search_active(true);
        assert_eq!(c.poll(Time(1.0)), None);
    }

    #[test]
    fn programmatic_fit_never_schedules_a_refresh() {
        let mut c = controller();
        c.on_viewport_settled(Time(0.0), viewport(16.01), SettleOrigin::ProgrammaticFit);
        assert!(!c.has_pending_refresh());
        assert_eq!(c.poll(Time(10.0)), None);
        assert_eq!(c.viewport().unwrap().bounds.min_lat, 16.01);
    }

    #[test]
    fn flush_immediately_seeds_without_waiting() {
        let mut c = controller();
        c.on_viewport_settled(Time(0.0), viewport(16.01), SettleOrigin::UserGesture);
        let bounds = c.flush_immediately(Time(0.0)).expect("seeded");
        assert_eq!(bounds.min_lat, 16.01);
        // The pending debounce was consumed by the flush.
        assert_eq!(c.poll(Time(1.0)), None);
    }

    #[test]
    fn teardown_cancels_pending_refresh() {
        let mut c = controller();
        c.on_viewport_settled(Time(0.0), viewport(16.01), SettleOrigin::UserGesture);
        c.teardown();
        assert_eq!(c.poll(Time(1.0)), None);
    }
}
