use gridwindow::VisibleWindow;

use crate::{FrameHandle, Scheduler};

/// Counters kept by a [`RenderLoop`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderStats {
    /// Frame callbacks handled.
    pub frames: u64,
    /// Targets promoted to the committed window.
    pub commits: u64,
    /// Frames that had a pending target but arrived before the frame interval elapsed.
    pub skipped_throttled: u64,
    /// Empty targets that were dropped instead of committed.
    pub skipped_empty: u64,
}

/// Frame-paced commit loop.
///
/// Visibility is recomputed on every scroll event and written into a single target slot with
/// [`Self::set_target`]; the most recent write always wins and older targets are never queued.
/// On each frame, if at least `frame_interval_ms` passed since the last commit, the pending
/// target replaces the committed window wholesale.
///
/// The loop holds at most one outstanding frame request, and none after [`Self::stop`].
#[derive(Clone, Debug)]
pub struct RenderLoop {
    frame_interval_ms: u64,
    pending_frame: Option<FrameHandle>,
    target: Option<VisibleWindow>,
    committed: VisibleWindow,
    last_commit_ms: Option<u64>,
    stats: RenderStats,
}

impl RenderLoop {
    pub fn new(frame_interval_ms: u64) -> Self {
        Self {
            frame_interval_ms,
            pending_frame: None,
            target: None,
            committed: VisibleWindow::EMPTY,
            last_commit_ms: None,
            stats: RenderStats::default(),
        }
    }

    pub fn frame_interval_ms(&self) -> u64 {
        self.frame_interval_ms
    }

    pub fn is_running(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Requests the first frame. Does nothing if a frame is already pending.
    pub fn start<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if self.pending_frame.is_some() {
            return;
        }
        let handle = scheduler.request_frame();
        gdebug!(frame = handle.0, "RenderLoop::start");
        self.pending_frame = Some(handle);
    }

    /// Cancels the pending frame. Safe to call any number of times.
    pub fn stop<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.pending_frame.take() {
            gdebug!(frame = handle.0, "RenderLoop::stop");
            scheduler.cancel_frame(handle);
        }
    }

    /// Replaces the pending target. Any target not yet committed is discarded.
    pub fn set_target(&mut self, window: VisibleWindow) {
        self.target = Some(window);
    }

    pub fn target(&self) -> Option<VisibleWindow> {
        self.target
    }

    pub fn committed(&self) -> VisibleWindow {
        self.committed
    }

    pub fn last_commit_ms(&self) -> Option<u64> {
        self.last_commit_ms
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Trims the committed and pending windows to `item_count`.
    ///
    /// Called when the item count shrinks so indices past the end are dropped immediately
    /// instead of on the next commit.
    pub fn clamp_committed(&mut self, item_count: usize) {
        self.committed = self.committed.clamp_to(item_count);
        if let Some(target) = self.target.as_mut() {
            *target = target.clamp_to(item_count);
        }
    }

    /// Forgets the target and committed windows. Does not touch the frame request.
    pub fn reset(&mut self) {
        self.target = None;
        self.committed = VisibleWindow::EMPTY;
        self.last_commit_ms = None;
    }

    /// Handles a frame callback and requests the next one.
    ///
    /// Returns `true` when the committed window was replaced. Callbacks for a handle other
    /// than the pending one (stale, cancelled, or after `stop`) are ignored.
    pub fn on_frame<S: Scheduler + ?Sized>(
        &mut self,
        handle: FrameHandle,
        now_ms: u64,
        scheduler: &mut S,
    ) -> bool {
        if self.pending_frame != Some(handle) {
            gtrace!(frame = handle.0, "RenderLoop: ignoring stale frame");
            return false;
        }
        self.pending_frame = None;
        self.stats.frames = self.stats.frames.saturating_add(1);

        let committed = self.try_commit(now_ms);
        self.pending_frame = Some(scheduler.request_frame());
        committed
    }

    fn try_commit(&mut self, now_ms: u64) -> bool {
        let Some(target) = self.target else {
            return false;
        };

        let due = match self.last_commit_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.frame_interval_ms,
        };
        if !due {
            self.stats.skipped_throttled = self.stats.skipped_throttled.saturating_add(1);
            return false;
        }

        self.target = None;
        if target.is_empty() {
            self.stats.skipped_empty = self.stats.skipped_empty.saturating_add(1);
            return false;
        }

        gtrace!(
            now_ms,
            start_index = target.start_index,
            end_index = target.end_index,
            "RenderLoop: commit"
        );
        self.committed = target;
        self.last_commit_ms = Some(now_ms);
        self.stats.commits = self.stats.commits.saturating_add(1);
        true
    }
}
