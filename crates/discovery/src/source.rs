use geoprim::GeoBounds;
use runloop::{Metrics, TaskSlot, TaskToken};
use tracing::{debug, warn};
use viewport::{FitConfig, FitDecision, fit_results};

use crate::entry::{RawEntry, RestaurantMapEntry, SearchRestaurant};
use crate::error::DiscoveryError;

/// Which restaurant set is authoritative.
///
/// Exactly one mode is authoritative at any time: while a manual search is
/// active its results are shown and viewport querying is suspended entirely.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DiscoveryMode {
    ManualSearch,
    ViewportBounds,
}

/// Identifies one bounds query against the discovery backend.
///
/// A key change invalidates and replaces any in-flight result.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundsQueryKey {
    pub zoom_level: u8,
    pub bounds: GeoBounds,
}

impl BoundsQueryKey {
    pub fn new(zoom_level: u8, bounds: GeoBounds) -> Self {
        Self { zoom_level, bounds }
    }
}

/// Resolves the authoritative restaurant set.
///
/// Ordering contract:
/// - Bounds-query results are applied only if they carry the token of the
///   most recently issued query (last-request-wins); stale completions are
///   counted and dropped.
/// - `entries()` preserves backend order, minus records that failed
///   coordinate validation.
#[derive(Debug)]
pub struct DiscoverySource {
    fit_config: FitConfig,
    mode: DiscoveryMode,
    search_entries: Vec<RestaurantMapEntry>,
    bounds_entries: Vec<RestaurantMapEntry>,
    active_key: Option<BoundsQueryKey>,
    slot: TaskSlot,
    error: Option<DiscoveryError>,
    metrics: Metrics,
}

impl DiscoverySource {
    pub fn new(fit_config: FitConfig) -> Self {
        Self {
            fit_config,
            mode: DiscoveryMode::ViewportBounds,
            search_entries: Vec::new(),
            bounds_entries: Vec::new(),
            active_key: None,
            slot: TaskSlot::new(),
            error: None,
            metrics: Metrics::new(),
        }
    }

    pub fn mode(&self) -> DiscoveryMode {
        self.mode
    }

    /// Supplies or clears the authoritative manual-search results.
    ///
    /// `Some` means a search query is active: its results (possibly zero)
    /// become authoritative, any in-flight bounds query is canceled, and the
    /// viewport fit for the result set is returned. `None` means the query
    /// was emptied and authority returns to `ViewportBounds`.
    pub fn set_search_results(
        &mut self,
        results: Option<&[SearchRestaurant]>,
    ) -> Option<FitDecision> {
        match results {
            Some(records) => {
                let before = records.len();
                self.search_entries = records.iter().filter_map(|r| r.to_map_entry()).collect();
                let dropped = before - self.search_entries.len();
                if dropped > 0 {
                    self.metrics.inc_by("search_entries_dropped", dropped as u64);
                    debug!(dropped, "dropped search results with invalid coordinates");
                }

                self.mode = DiscoveryMode::ManualSearch;
                self.slot.cancel();
                self.error = None;

                let points: Vec<_> = self.search_entries.iter().map(|e| e.coordinates).collect();
                fit_results(&points, &self.fit_config)
            }
            None => {
                self.search_entries.clear();
                self.mode = DiscoveryMode::ViewportBounds;
                None
            }
        }
    }

    /// Starts a bounds query for `key`.
    ///
    /// Returns the token the embedder must echo with the result, or `None`
    /// while a manual search is authoritative (no network call is made).
    pub fn begin_bounds_query(&mut self, key: BoundsQueryKey) -> Option<TaskToken> {
        if self.mode == DiscoveryMode::ManualSearch {
            return None;
        }
        self.active_key = Some(key);
        self.metrics.inc("bounds_queries_issued");
        Some(self.slot.begin())
    }

    /// Applies a bounds-query completion.
    ///
    /// Returns `false` (and changes nothing) for a superseded token.
    pub fn apply_query_result(
        &mut self,
        token: TaskToken,
        result: Result<Vec<RawEntry>, DiscoveryError>,
    ) -> bool {
        if !self.slot.try_complete(token) {
            self.metrics.inc("stale_results_ignored");
            debug!(?token, "ignoring stale bounds-query result");
            return false;
        }

        match result {
            Ok(raw) => {
                let before = raw.len();
                self.bounds_entries = raw.iter().filter_map(|r| r.validate()).collect();
                let dropped = before - self.bounds_entries.len();
                if dropped > 0 {
                    self.metrics.inc_by("entries_dropped", dropped as u64);
                    debug!(dropped, "dropped bounds-query records with invalid coordinates");
                }
                self.error = None;
            }
            Err(err) => {
                warn!(%err, "bounds query failed");
                self.metrics.inc("bounds_queries_failed");
                self.bounds_entries.clear();
                self.error = Some(err);
            }
        }
        true
    }

    /// The authoritative restaurant set for the current mode.
    pub fn entries(&self) -> &[RestaurantMapEntry] {
        match self.mode {
            DiscoveryMode::ManualSearch => &self.search_entries,
            DiscoveryMode::ViewportBounds => &self.bounds_entries,
        }
    }

    /// True while a relevant bounds query is pending.
    pub fn is_loading(&self) -> bool {
        self.mode == DiscoveryMode::ViewportBounds && self.slot.is_in_flight()
    }

    pub fn error(&self) -> Option<&DiscoveryError> {
        self.error.as_ref()
    }

    pub fn active_key(&self) -> Option<BoundsQueryKey> {
        self.active_key
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Marks in-flight work as to-be-ignored on component disposal.
    pub fn teardown(&mut self) {
        self.slot.cancel();
    }
}
