use alloc::vec::Vec;

/// Identifies one requested frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameHandle(pub u64);

/// Identifies one pending timeout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerHandle(pub u64);

/// The host's timing services.
///
/// Callbacks are not closures: when a requested frame or timeout fires, the host calls
/// [`crate::GridController::on_frame`] / [`crate::GridController::on_timeout`] with the
/// handle it returned here. Cancelled handles must never be delivered; the controller ignores
/// unknown handles anyway.
///
/// In a browser host this maps onto `requestAnimationFrame`/`cancelAnimationFrame` and
/// `setTimeout`/`clearTimeout`.
pub trait Scheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
    fn set_timeout(&mut self, delay_ms: u64) -> TimerHandle;
    fn clear_timeout(&mut self, handle: TimerHandle);
}

/// A callback that came due in a [`ManualScheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fired {
    Frame(FrameHandle),
    Timeout(TimerHandle),
}

/// A deterministic [`Scheduler`] driven by an explicit clock.
///
/// Useful for tests and headless simulations: nothing fires until [`Self::advance_to`] is
/// called.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    next_id: u64,
    frames: Vec<FrameHandle>,
    timers: Vec<(TimerHandle, u64)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Returns `true` when no frame or timeout is scheduled.
    pub fn is_idle(&self) -> bool {
        self.frames.is_empty() && self.timers.is_empty()
    }

    /// Moves the clock forward and returns every callback that is now due.
    ///
    /// Timeouts come first (ordered by due time), followed by every pending frame. Frames
    /// requested while the returned callbacks are being handled wait for the next call, like
    /// animation frames do.
    ///
    /// The clock never moves backwards; an earlier `now_ms` is treated as the current time.
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<Fired> {
        let now_ms = self.now_ms.max(now_ms);
        self.now_ms = now_ms;

        let mut due: Vec<(TimerHandle, u64)> = Vec::new();
        self.timers.retain(|&(handle, at)| {
            if at <= now_ms {
                due.push((handle, at));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(handle, at)| (at, handle));

        let mut fired: Vec<Fired> = due.into_iter().map(|(h, _)| Fired::Timeout(h)).collect();
        fired.extend(self.frames.drain(..).map(Fired::Frame));
        fired
    }

    fn next_id(&mut self) -> u64 {
        self.next_id = self.next_id.wrapping_add(1);
        self.next_id
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.frames.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.retain(|&h| h != handle);
    }

    fn set_timeout(&mut self, delay_ms: u64) -> TimerHandle {
        let handle = TimerHandle(self.next_id());
        self.timers.push((handle, self.now_ms.saturating_add(delay_ms)));
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        self.timers.retain(|&(h, _)| h != handle);
    }
}
