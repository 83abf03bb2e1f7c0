use crate::{Scheduler, TimerHandle};

/// Reads the platform's current device pixel ratio.
///
/// No push notification for zoom changes is assumed; the controller polls this on pointer-up
/// and key-up as a heuristic for "the user may have zoomed".
pub trait ZoomSource {
    fn poll_zoom_ratio(&self) -> f64;
}

impl<F: Fn() -> f64> ZoomSource for F {
    fn poll_zoom_ratio(&self) -> f64 {
        self()
    }
}

/// Detects device-pixel-ratio changes and debounces the resulting relayout.
///
/// Zoom gestures report several intermediate ratios; only a ratio that stays put for
/// `debounce_ms` triggers the `O(item_count)` invalidation.
#[derive(Clone, Debug)]
pub struct ZoomMonitor {
    last_ratio: Option<f64>,
    debounce_ms: u64,
    pending: Option<TimerHandle>,
}

impl ZoomMonitor {
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            last_ratio: None,
            debounce_ms,
            pending: None,
        }
    }

    pub fn last_ratio(&self) -> Option<f64> {
        self.last_ratio
    }

    pub fn debounce_ms(&self) -> u64 {
        self.debounce_ms
    }

    /// Returns `true` while a settle timeout is pending.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records `ratio` as the baseline without reporting a change.
    pub fn observe(&mut self, ratio: f64) {
        if is_valid_ratio(ratio) {
            self.last_ratio = Some(ratio);
        }
    }

    /// Compares `current_ratio` against the last observed value and records it.
    ///
    /// The first valid observation only sets the baseline. Non-finite or non-positive ratios
    /// are ignored.
    pub fn check(&mut self, current_ratio: f64) -> bool {
        if !is_valid_ratio(current_ratio) {
            gwarn!(ratio = current_ratio, "ZoomMonitor: ignoring invalid device pixel ratio");
            return false;
        }
        match self.last_ratio.replace(current_ratio) {
            Some(prev) if prev != current_ratio => {
                gdebug!(from = prev, to = current_ratio, "ZoomMonitor: ratio changed");
                true
            }
            _ => false,
        }
    }

    /// (Re)starts the debounce timer; an already pending timer is cleared first.
    pub fn schedule_settle<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.pending.take() {
            scheduler.clear_timeout(handle);
        }
        self.pending = Some(scheduler.set_timeout(self.debounce_ms));
    }

    /// Returns `true` if `handle` is the pending settle timer, consuming it.
    pub fn on_timeout(&mut self, handle: TimerHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Clears the pending settle timer, if any.
    pub fn cancel<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.pending.take() {
            scheduler.clear_timeout(handle);
        }
    }
}

fn is_valid_ratio(ratio: f64) -> bool {
    ratio.is_finite() && ratio > 0.0
}
