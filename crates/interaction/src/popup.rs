use geoprim::Time;
use runloop::DelayTimer;

/// Tuning for popup close hysteresis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PopupConfig {
    /// Grace window between losing hover and actually closing (seconds).
    /// Tolerates cursor transit between a marker and its popup.
    pub close_grace_s: f64,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self { close_grace_s: 0.2 }
    }
}

/// One popup's visibility against two hover inputs plus a click toggle.
///
/// Contract:
/// - Hovering either the marker or the popup opens it; losing both only
///   closes it after the grace window, and regaining either hover within the
///   window cancels the pending close (no flicker).
/// - A click toggles visibility regardless of hover state; a click-opened
///   popup is pinned and does not close on hover loss.
/// - `force_close` resets both hover flags and cancels the timer.
/// - No operation panics; all are idempotent.
#[derive(Debug, Default)]
pub struct PopupController {
    config: PopupConfig,
    hovering_marker: bool,
    hovering_popup: bool,
    pinned_open: bool,
    open: bool,
    pending_close: DelayTimer,
}

impl PopupController {
    pub fn new(config: PopupConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn has_pending_close(&self) -> bool {
        self.pending_close.is_pending()
    }

    pub fn enter_marker(&mut self) {
        self.hovering_marker = true;
        self.pending_close.cancel();
        self.open = true;
    }

    pub fn leave_marker(&mut self, now: Time) {
        self.hovering_marker = false;
        self.maybe_schedule_close(now);
    }

    pub fn enter_popup(&mut self) {
        self.hovering_popup = true;
        self.pending_close.cancel();
        self.open = true;
    }

    pub fn leave_popup(&mut self, now: Time) {
        self.hovering_popup = false;
        self.maybe_schedule_close(now);
    }

    /// Click toggle, independent of hover.
    ///
    /// Opening by click pins the popup; closing by click closes immediately.
    pub fn toggle_via_click(&mut self) {
        if self.open {
            self.open = false;
            self.pinned_open = false;
            self.pending_close.cancel();
        } else {
            self.open = true;
            self.pinned_open = true;
            self.pending_close.cancel();
        }
    }

    /// Force-close from an explicit close button.
    pub fn force_close(&mut self) {
        self.open = false;
        self.hovering_marker = false;
        self.hovering_popup = false;
        self.pinned_open = false;
        self.pending_close.cancel();
    }

    /// Applies a due close.
    ///
    /// Returns `true` if the popup closed on this poll.
    pub fn poll(&mut self, now: Time) -> bool {
        if !self.pending_close.fire_if_due(now) {
            return false;
        }
        // Re-entry cancels the timer, so firing always means both hovers are
        // gone and the popup is not pinned.
        self.open = false;
        true
    }

    /// Cancels the pending close on unmount so no update can land on
    /// disposed state.
    pub fn teardown(&mut self) {
        self.pending_close.cancel();
    }

    fn maybe_schedule_close(&mut self, now: Time) {
        if self.hovering_marker || self.hovering_popup || self.pinned_open || !self.open {
            return;
        }
        self.pending_close.schedule(now, self.config.close_grace_s);
    }
}
