use alloc::vec::Vec;

use gridwindow::{
    GridConfig, GridKey, Layout, PlacedItem, PlacedItemKeyed, PositionCache, PositionEntry,
    ScrollState, VisibleWindow, compute_layout, compute_window, first_duplicate_key,
    for_each_placed_item, for_each_placed_item_keyed,
};

use crate::{
    ControllerOptions, Fired, FrameHandle, GridElement, GridError, ManualScheduler, RenderLoop,
    RenderStats, Scheduler, ScrollBinder, ScrollContainer, TimerHandle, ZoomMonitor, ZoomSource,
};

/// Lifecycle state of a [`GridController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridState {
    Uninitialized,
    /// Layout is being (re)computed, or the grid element cannot be measured yet.
    Measuring,
    /// Layout is settled; scroll events only move the target window.
    Ready,
    /// Torn down. Terminal.
    Destroyed,
}

/// A point-in-time view of a controller, for diagnostics or state restoration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSnapshot {
    pub state: GridState,
    pub layout: Option<Layout>,
    pub scroll: ScrollState,
    pub target: Option<VisibleWindow>,
    pub committed: VisibleWindow,
    pub zoom_ratio: Option<f64>,
    pub stats: RenderStats,
}

/// Owns the windowing state of one grid and drives it from host events.
///
/// The controller holds no UI objects besides the element/container handles it was
/// initialized with. Hosts drive it by calling:
/// - `on_items_changed` when the item collection changes
/// - `on_scroll` from the scroll listener, `on_resize` when the grid resizes
/// - `on_pointer_up` / `on_key_up` so zoom changes can be detected
/// - `on_frame` / `on_timeout` when a callback requested through the [`Scheduler`] fires
///
/// and render exactly [`Self::committed_window`], sizing a spacer to [`Self::total_height`].
///
/// Every handler runs to completion; after [`Self::destroy`] (or drop) no frame, timer or
/// listener remains registered and all handlers are no-ops.
#[derive(Debug)]
pub struct GridController<K, E, C: ScrollContainer, Z, S: Scheduler> {
    config: GridConfig,
    options: ControllerOptions,
    state: GridState,
    keys: Vec<K>,
    layout: Option<Layout>,
    positions: PositionCache,
    binder: Option<ScrollBinder<E, C>>,
    zoom: ZoomMonitor,
    zoom_source: Z,
    render: RenderLoop,
    scheduler: S,
}

impl<K, E, C, Z, S> GridController<K, E, C, Z, S>
where
    K: GridKey,
    E: GridElement,
    C: ScrollContainer,
    Z: ZoomSource,
    S: Scheduler,
{
    /// Creates an uninitialized controller.
    ///
    /// An invalid `config` is accepted and degrades to a single-column grid; use
    /// [`GridConfig::try_new`] to reject it up front.
    pub fn new(
        config: GridConfig,
        options: ControllerOptions,
        zoom_source: Z,
        scheduler: S,
    ) -> Self {
        if let Err(_err) = config.validate() {
            gwarn!(error = %_err, "GridController::new with invalid config");
        }
        Self {
            config,
            options,
            state: GridState::Uninitialized,
            keys: Vec::new(),
            layout: None,
            positions: PositionCache::new(),
            binder: None,
            zoom: ZoomMonitor::new(options.zoom_debounce_ms),
            zoom_source,
            render: RenderLoop::new(options.frame_interval_ms),
            scheduler,
        }
    }

    pub fn state(&self) -> GridState {
        self.state
    }

    pub fn is_destroyed(&self) -> bool {
        self.state == GridState::Destroyed
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn zoom_source(&self) -> &Z {
        &self.zoom_source
    }

    pub fn binder(&self) -> Option<&ScrollBinder<E, C>> {
        self.binder.as_ref()
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn item_count(&self) -> usize {
        self.keys.len()
    }

    /// Binds to the grid element and its scroll container, computes the first layout and starts
    /// the render loop.
    pub fn initialize(&mut self, element: E, container: C) -> Result<(), GridError> {
        match self.state {
            GridState::Uninitialized => {}
            GridState::Destroyed => return Err(GridError::Destroyed),
            GridState::Measuring | GridState::Ready => return Err(GridError::AlreadyInitialized),
        }
        gdebug!(items = self.keys.len(), "GridController::initialize");

        self.binder = Some(ScrollBinder::bind(element, container));
        self.zoom.observe(self.zoom_source.poll_zoom_ratio());
        self.render.start(&mut self.scheduler);
        self.relayout(false);
        Ok(())
    }

    /// Rebinds after the grid element was remounted, possibly under a different container.
    pub fn rebind(&mut self, element: E, container: C) -> Result<(), GridError> {
        if self.state == GridState::Destroyed {
            return Err(GridError::Destroyed);
        }
        let Some(binder) = self.binder.as_mut() else {
            return Err(GridError::NotInitialized);
        };
        binder.rebind(element, container);
        self.relayout(true);
        Ok(())
    }

    /// Applies a new item footprint / scroll buffer and relayouts.
    ///
    /// An invalid config is rejected and the current one is kept.
    pub fn reconfigure(&mut self, config: GridConfig) -> Result<(), GridError> {
        if self.state == GridState::Destroyed {
            return Err(GridError::Destroyed);
        }
        config.validate()?;
        self.config = config;
        if self.state != GridState::Uninitialized {
            self.relayout(true);
        }
        Ok(())
    }

    /// Replaces the item collection (by key) and relayouts.
    pub fn on_items_changed(&mut self, keys: impl IntoIterator<Item = K>) {
        if self.state == GridState::Destroyed {
            gtrace!("on_items_changed after destroy");
            return;
        }
        self.keys.clear();
        self.keys.extend(keys);
        if let Some(_index) = first_duplicate_key(&self.keys) {
            gwarn!(index = _index, "duplicate item key; keyed rendering may misbehave");
        }
        self.render.clamp_committed(self.keys.len());

        if self.state != GridState::Uninitialized {
            self.relayout(false);
        }
    }

    pub fn on_resize(&mut self) {
        if !self.is_active() {
            return;
        }
        self.relayout(true);
    }

    /// Runs the full zoom invalidation immediately.
    ///
    /// Normally reached through the debounce timer started by `on_pointer_up`/`on_key_up`.
    pub fn on_zoom_settled(&mut self) {
        if !self.is_active() {
            return;
        }
        gdebug!(ratio = ?self.zoom.last_ratio(), "zoom settled");
        self.relayout(true);
    }

    /// Cheap path: recomputes only the target window.
    ///
    /// If the grid became unmeasurable since the last layout, the controller falls back to
    /// `Measuring` with an empty target instead.
    pub fn on_scroll(&mut self) {
        if !self.is_active() {
            return;
        }
        if self.state == GridState::Measuring {
            self.retry_measure();
            return;
        }
        if self.measured_width().is_none() {
            self.enter_unmeasured();
            return;
        }
        self.update_target(self.config.buffer_rows);
    }

    pub fn on_pointer_up(&mut self) {
        self.check_zoom();
    }

    pub fn on_key_up(&mut self) {
        self.check_zoom();
    }

    /// Handles a frame callback. Returns `true` if the committed window changed.
    pub fn on_frame(&mut self, handle: FrameHandle, now_ms: u64) -> bool {
        if !self.is_active() {
            return false;
        }
        if self.state == GridState::Measuring {
            self.retry_measure();
        }
        self.render.on_frame(handle, now_ms, &mut self.scheduler)
    }

    /// Handles a timeout callback.
    pub fn on_timeout(&mut self, handle: TimerHandle, _now_ms: u64) {
        if !self.is_active() {
            return;
        }
        if self.zoom.on_timeout(handle) {
            self.on_zoom_settled();
        }
    }

    pub fn on_fired(&mut self, fired: Fired, now_ms: u64) -> bool {
        match fired {
            Fired::Frame(handle) => self.on_frame(handle, now_ms),
            Fired::Timeout(handle) => {
                self.on_timeout(handle, now_ms);
                false
            }
        }
    }

    /// Stops the render loop, clears timers, unbinds the scroll listener. Irreversible.
    pub fn destroy(&mut self) {
        if self.state == GridState::Destroyed {
            return;
        }
        gdebug!(state = ?self.state, "GridController::destroy");
        self.teardown();
        self.state = GridState::Destroyed;
        self.layout = None;
        self.positions.clear();
        self.render.reset();
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Height for the spacer element that keeps the native scrollbar proportional.
    pub fn total_height(&self) -> f64 {
        self.layout.map_or(0.0, |l| l.total_height)
    }

    /// The latest computed window that has not been committed yet.
    pub fn target_window(&self) -> Option<VisibleWindow> {
        self.render.target()
    }

    /// The window the presentation layer should currently render.
    ///
    /// Never reaches past the current item count, and is empty while no layout is available.
    pub fn committed_window(&self) -> VisibleWindow {
        match self.layout {
            Some(layout) => self.render.committed().clamp_to(layout.item_count),
            None => VisibleWindow::EMPTY,
        }
    }

    /// Current grid-relative scroll state (zeroed when unbound or unmounted).
    pub fn scroll_state(&self) -> ScrollState {
        self.binder
            .as_ref()
            .map(ScrollBinder::scroll_state)
            .unwrap_or_default()
    }

    /// Position of `index`, or `None` when there is no layout or the index is out of range.
    pub fn position(&self, index: usize) -> Option<PositionEntry> {
        let layout = self.layout.as_ref()?;
        (index < layout.item_count).then(|| self.positions.lookup(index, layout))
    }

    pub fn for_each_committed_item(&self, f: impl FnMut(PlacedItem)) {
        let Some(layout) = self.layout.as_ref() else {
            return;
        };
        for_each_placed_item(self.committed_window(), layout, &self.positions, f);
    }

    pub fn for_each_committed_item_keyed(&self, f: impl FnMut(PlacedItemKeyed<K>))
    where
        K: Clone,
    {
        let Some(layout) = self.layout.as_ref() else {
            return;
        };
        let window = self.committed_window();
        for_each_placed_item_keyed(window, layout, &self.positions, &self.keys, f);
    }

    /// Collects the committed items into `out` (clears `out` first).
    pub fn collect_committed_items(&self, out: &mut Vec<PlacedItem>) {
        out.clear();
        self.for_each_committed_item(|it| out.push(it));
    }

    /// Collects the committed keyed items into `out` (clears `out` first).
    pub fn collect_committed_items_keyed(&self, out: &mut Vec<PlacedItemKeyed<K>>)
    where
        K: Clone,
    {
        out.clear();
        self.for_each_committed_item_keyed(|it| out.push(it));
    }

    pub fn stats(&self) -> RenderStats {
        self.render.stats()
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            state: self.state,
            layout: self.layout,
            scroll: self.scroll_state(),
            target: self.render.target(),
            committed: self.committed_window(),
            zoom_ratio: self.zoom.last_ratio(),
            stats: self.render.stats(),
        }
    }

    fn is_active(&self) -> bool {
        matches!(self.state, GridState::Measuring | GridState::Ready)
    }

    fn check_zoom(&mut self) {
        if !self.is_active() {
            return;
        }
        let ratio = self.zoom_source.poll_zoom_ratio();
        if self.zoom.check(ratio) {
            self.zoom.schedule_settle(&mut self.scheduler);
        }
    }

    /// Expensive path: layout, position cache and a layout-buffered target window.
    fn relayout(&mut self, clear_cache: bool) {
        self.state = GridState::Measuring;
        if clear_cache {
            self.positions.clear();
        }

        let Some(width) = self.measured_width() else {
            self.enter_unmeasured();
            return;
        };

        let count = self.keys.len();
        let layout = compute_layout(width, count, &self.config);
        self.positions.build(&layout, count);
        self.layout = Some(layout);
        self.render.clamp_committed(count);
        self.state = GridState::Ready;
        gdebug!(
            width,
            items = count,
            columns = layout.columns_per_row,
            total_height = layout.total_height,
            "relayout"
        );
        self.update_target(self.options.layout_buffer_rows);
    }

    /// Relayouts only once the element has become measurable.
    fn retry_measure(&mut self) {
        if self.measured_width().is_some() {
            self.relayout(false);
        }
    }

    /// Grid width, provided both the width and the grid's scroll offset can be read.
    fn measured_width(&self) -> Option<f64> {
        let binder = self.binder.as_ref()?;
        binder.grid_top()?;
        binder.grid_width()
    }

    /// Drops the layout and targets an empty window until the grid can be measured again.
    fn enter_unmeasured(&mut self) {
        gdebug!(state = ?self.state, "grid element cannot be measured");
        self.state = GridState::Measuring;
        self.layout = None;
        self.positions.clear();
        self.render.set_target(VisibleWindow::EMPTY);
    }

    fn update_target(&mut self, buffer_rows: usize) {
        let (Some(layout), Some(binder)) = (self.layout.as_ref(), self.binder.as_ref()) else {
            return;
        };
        let window = compute_window(binder.scroll_state(), layout, buffer_rows);
        self.render.set_target(window);
    }
}

impl<K, E, C: ScrollContainer, Z, S: Scheduler> GridController<K, E, C, Z, S> {
    fn teardown(&mut self) {
        self.render.stop(&mut self.scheduler);
        self.zoom.cancel(&mut self.scheduler);
        if let Some(binder) = self.binder.as_mut() {
            binder.unbind();
        }
    }
}

impl<K, E, C: ScrollContainer, Z, S: Scheduler> Drop for GridController<K, E, C, Z, S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<K, E, C, Z> GridController<K, E, C, Z, ManualScheduler>
where
    K: GridKey,
    E: GridElement,
    C: ScrollContainer,
    Z: ZoomSource,
{
    /// Advances the manual clock and dispatches every callback that came due.
    ///
    /// Returns how many times the committed window changed.
    pub fn advance_to(&mut self, now_ms: u64) -> usize {
        let fired = self.scheduler.advance_to(now_ms);
        fired
            .into_iter()
            .filter(|&f| self.on_fired(f, now_ms))
            .count()
    }
}
