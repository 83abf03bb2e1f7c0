use crate::*;

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use gridwindow::{GridConfig, PlacedItem, VisibleWindow};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start))
    }
}

/// Shared geometry for a fake grid element and its scroll container.
///
/// The grid sits `grid_offset` pixels into the container's scrollable content.
#[derive(Debug)]
struct Page {
    mounted: Cell<bool>,
    width: Cell<f64>,
    grid_offset: Cell<f64>,
    attached: Cell<bool>,
    container_top: Cell<f64>,
    scroll_top: Cell<f64>,
    viewport_height: Cell<f64>,
    listeners: RefCell<Vec<ListenerId>>,
    next_listener: Cell<u64>,
}

impl Page {
    fn new(width: f64) -> Rc<Self> {
        Rc::new(Self {
            mounted: Cell::new(true),
            width: Cell::new(width),
            grid_offset: Cell::new(0.0),
            attached: Cell::new(true),
            container_top: Cell::new(64.0),
            scroll_top: Cell::new(0.0),
            viewport_height: Cell::new(800.0),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
        })
    }

    fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

#[derive(Clone, Debug)]
struct FakeElement(Rc<Page>);

impl GridElement for FakeElement {
    fn is_mounted(&self) -> bool {
        self.0.mounted.get()
    }

    fn width(&self) -> f64 {
        self.0.width.get()
    }

    fn client_top(&self) -> f64 {
        self.0.container_top.get() + self.0.grid_offset.get() - self.0.scroll_top.get()
    }
}

#[derive(Clone, Debug)]
struct FakeContainer(Rc<Page>);

impl ScrollContainer for FakeContainer {
    fn is_attached(&self) -> bool {
        self.0.attached.get()
    }

    fn scroll_top(&self) -> f64 {
        self.0.scroll_top.get()
    }

    fn viewport_height(&self) -> f64 {
        self.0.viewport_height.get()
    }

    fn client_top(&self) -> f64 {
        self.0.container_top.get()
    }

    fn add_scroll_listener(&self) -> ListenerId {
        let id = ListenerId(self.0.next_listener.get() + 1);
        self.0.next_listener.set(id.0);
        self.0.listeners.borrow_mut().push(id);
        id
    }

    fn remove_scroll_listener(&self, id: ListenerId) {
        self.0.listeners.borrow_mut().retain(|&l| l != id);
    }
}

#[derive(Clone, Debug)]
struct FakeZoom(Rc<Cell<f64>>);

impl ZoomSource for FakeZoom {
    fn poll_zoom_ratio(&self) -> f64 {
        self.0.get()
    }
}

type TestController = GridController<u64, FakeElement, FakeContainer, FakeZoom, ManualScheduler>;

fn storefront_config() -> GridConfig {
    GridConfig::new(245.0, 450.0).with_buffer_rows(2)
}

fn new_controller(zoom: &Rc<Cell<f64>>) -> TestController {
    GridController::new(
        storefront_config(),
        ControllerOptions::default(),
        FakeZoom(Rc::clone(zoom)),
        ManualScheduler::new(),
    )
}

fn mounted_controller(page: &Rc<Page>, items: u64) -> (TestController, Rc<Cell<f64>>) {
    let zoom = Rc::new(Cell::new(1.0));
    let mut c = new_controller(&zoom);
    c.on_items_changed(0..items);
    c.initialize(FakeElement(Rc::clone(page)), FakeContainer(Rc::clone(page)))
        .unwrap();
    (c, zoom)
}

fn assert_within(w: VisibleWindow, count: usize) {
    assert!(w.start_index <= w.end_index && w.end_index <= count, "{w:?} count={count}");
}

#[test]
fn initialize_lays_out_and_commits_on_first_frame() {
    let page = Page::new(1000.0);
    let (mut c, _zoom) = mounted_controller(&page, 42);

    assert_eq!(c.state(), GridState::Ready);
    let layout = *c.layout().unwrap();
    assert_eq!(layout.columns_per_row, 4);
    assert_eq!(c.total_height(), 4950.0);
    assert_eq!(page.listener_count(), 1);

    // Layout pass uses the wider buffer: (0 + 8 + 3) rows would reach 44, clamped to 42.
    assert_eq!(c.target_window(), Some(VisibleWindow::new(0, 42)));
    assert!(c.committed_window().is_empty());

    assert_eq!(c.advance_to(0), 1);
    assert_eq!(c.committed_window(), VisibleWindow::new(0, 42));
    assert_eq!(c.target_window(), None);
    assert_eq!(c.scheduler().pending_frames(), 1);
}

#[test]
fn scroll_only_moves_the_target() {
    let page = Page::new(1000.0);
    let (mut c, _zoom) = mounted_controller(&page, 400);
    c.advance_to(0);
    let layout_before = *c.layout().unwrap();

    page.scroll_top.set(4600.0);
    c.on_scroll();

    assert_eq!(c.state(), GridState::Ready);
    assert_eq!(c.target_window(), Some(VisibleWindow::new(32, 72)));
    assert_eq!(*c.layout().unwrap(), layout_before);

    assert_eq!(c.advance_to(16), 1);
    assert_eq!(c.committed_window(), VisibleWindow::new(32, 72));
}

#[test]
fn scroll_is_relative_to_the_grid_top() {
    let page = Page::new(1000.0);
    page.grid_offset.set(600.0);
    let (mut c, _zoom) = mounted_controller(&page, 400);

    page.scroll_top.set(500.0);
    c.on_scroll();
    assert_eq!(c.scroll_state().scroll_top, 0.0);

    page.scroll_top.set(5200.0);
    c.on_scroll();
    assert_eq!(c.scroll_state().scroll_top, 4600.0);
    assert_eq!(c.target_window(), Some(VisibleWindow::new(32, 72)));
}

#[test]
fn latest_target_wins() {
    let page = Page::new(1000.0);
    let (mut c, _zoom) = mounted_controller(&page, 400);
    c.advance_to(0);

    for top in [900.0, 9000.0, 2250.0] {
        page.scroll_top.set(top);
        c.on_scroll();
    }
    c.advance_to(16);

    // start_row = 5 => rows 3..13.
    assert_eq!(c.committed_window(), VisibleWindow::new(12, 52));
    assert_eq!(c.stats().commits, 2);
}

#[test]
fn commits_are_paced_by_the_frame_interval() {
    let page = Page::new(1000.0);
    let (mut c, _zoom) = mounted_controller(&page, 2000);

    let mut commit_times = Vec::new();
    for now in 0..=400u64 {
        page.scroll_top.set(now as f64 * 37.0);
        c.on_scroll();
        // A 240Hz display: frames every 4ms, scroll events every 1ms.
        if now % 4 == 0 && c.advance_to(now) > 0 {
            commit_times.push(now);
        }
    }

    assert!(commit_times.len() > 10);
    for pair in commit_times.windows(2) {
        assert!(pair[1] - pair[0] >= 16, "commits too close: {pair:?}");
    }
    assert!(c.stats().skipped_throttled > 0);
}

#[test]
fn shrinking_items_clamps_the_committed_window() {
    let page = Page::new(1000.0);
    page.scroll_top.set(900.0);
    let (mut c, _zoom) = mounted_controller(&page, 42);

    c.on_scroll();
    c.advance_to(0);
    assert_eq!(c.committed_window(), VisibleWindow::new(0, 40));

    // A filter reduced the results.
    c.on_items_changed(0..10);
    assert_eq!(c.committed_window(), VisibleWindow::new(0, 10));
    assert_eq!(c.target_window(), Some(VisibleWindow::new(0, 10)));
    assert_eq!(c.total_height(), 3.0 * 450.0);

    let mut placed = Vec::new();
    c.collect_committed_items(&mut placed);
    assert!(placed.iter().all(|it| it.index < 10));

    c.advance_to(16);
    assert_eq!(c.committed_window(), VisibleWindow::new(0, 10));
}

#[test]
fn emptying_the_collection_renders_nothing() {
    let page = Page::new(1000.0);
    let (mut c, _zoom) = mounted_controller(&page, 42);
    c.advance_to(0);

    c.on_items_changed(core::iter::empty());
    assert!(c.committed_window().is_empty());
    assert_eq!(c.total_height(), 0.0);

    c.advance_to(16);
    assert!(c.committed_window().is_empty());
    assert_eq!(c.stats().skipped_empty, 1);
}

#[test]
fn resize_clears_and_rebuilds_layout() {
    let page = Page::new(1000.0);
    let (mut c, _zoom) = mounted_controller(&page, 42);

    page.width.set(500.0);
    c.on_resize();

    let layout = *c.layout().unwrap();
    assert_eq!(layout.columns_per_row, 2);
    assert_eq!(c.total_height(), 21.0 * 450.0);
    assert_eq!(c.position(3), Some(gridwindow::position_of(3, &layout)));
    assert_eq!(c.position(42), None);
}

#[test]
fn zoom_relayout_waits_for_the_ratio_to_settle() {
    let page = Page::new(1000.0);
    let (mut c, zoom) = mounted_controller(&page, 42);

    // Zooming in shrinks the CSS width available to the grid.
    page.width.set(800.0);
    zoom.set(1.25);
    c.on_pointer_up();
    assert_eq!(c.scheduler().pending_timers(), 1);

    c.advance_to(100);
    zoom.set(1.5);
    page.width.set(500.0);
    c.on_key_up();
    assert_eq!(c.scheduler().pending_timers(), 1);

    c.advance_to(399);
    assert_eq!(c.layout().unwrap().container_width, 1000.0);

    c.advance_to(400);
    assert_eq!(c.layout().unwrap().container_width, 500.0);
    assert_eq!(c.layout().unwrap().columns_per_row, 2);
    assert_eq!(c.snapshot().zoom_ratio, Some(1.5));
    assert_eq!(c.scheduler().pending_timers(), 0);
}

#[test]
fn unchanged_zoom_schedules_nothing() {
    let page = Page::new(1000.0);
    let (mut c, _zoom) = mounted_controller(&page, 42);

    c.on_pointer_up();
    c.on_key_up();
    assert_eq!(c.scheduler().pending_timers(), 0);
}

#[test]
fn unmounted_grid_degrades_then_measures_on_a_later_frame() {
    let page = Page::new(1000.0);
    page.mounted.set(false);
    let (mut c, _zoom) = mounted_controller(&page, 42);

    assert_eq!(c.state(), GridState::Measuring);
    assert!(c.layout().is_none());
    assert_eq!(c.total_height(), 0.0);
    assert_eq!(c.scroll_state(), gridwindow::ScrollState::default());

    c.on_scroll();
    assert_eq!(c.advance_to(0), 0);
    assert!(c.committed_window().is_empty());

    page.mounted.set(true);
    assert_eq!(c.advance_to(16), 1);
    assert_eq!(c.state(), GridState::Ready);
    assert_eq!(c.committed_window(), VisibleWindow::new(0, 42));
}

#[test]
fn zero_width_counts_as_unmeasured() {
    let page = Page::new(0.0);
    let (mut c, _zoom) = mounted_controller(&page, 42);
    assert_eq!(c.state(), GridState::Measuring);

    page.width.set(1000.0);
    c.on_scroll();
    assert_eq!(c.state(), GridState::Ready);
    assert_eq!(c.layout().unwrap().columns_per_row, 4);
}

#[test]
fn unmounting_while_scrolled_never_jumps_to_the_top() {
    let page = Page::new(1000.0);
    page.scroll_top.set(9000.0);
    let (mut c, _zoom) = mounted_controller(&page, 400);
    c.on_scroll();
    c.advance_to(0);
    assert_eq!(c.committed_window(), VisibleWindow::new(72, 112));

    page.mounted.set(false);
    c.on_scroll();
    assert_eq!(c.state(), GridState::Measuring);
    assert!(c.layout().is_none());
    assert_eq!(c.target_window(), Some(VisibleWindow::EMPTY));

    for now in [16, 32, 48] {
        c.on_scroll();
        c.advance_to(now);
        assert!(c.committed_window().is_empty(), "{:?}", c.committed_window());
    }

    page.mounted.set(true);
    assert_eq!(c.advance_to(64), 1);
    assert_eq!(c.state(), GridState::Ready);
    assert_eq!(c.committed_window(), VisibleWindow::new(68, 124));

    // A detached scroll container degrades the same way.
    page.attached.set(false);
    c.on_scroll();
    assert_eq!(c.state(), GridState::Measuring);
    assert!(c.committed_window().is_empty());
}

#[test]
fn destroy_leaves_nothing_scheduled_or_bound() {
    let page = Page::new(1000.0);
    let (mut c, zoom) = mounted_controller(&page, 400);
    c.advance_to(0);

    zoom.set(2.0);
    c.on_pointer_up();
    assert_eq!(c.scheduler().pending_timers(), 1);

    c.destroy();
    assert_eq!(c.state(), GridState::Destroyed);
    assert!(c.scheduler().is_idle());
    assert_eq!(page.listener_count(), 0);
    assert!(c.committed_window().is_empty());

    let stats = c.stats();
    page.scroll_top.set(3000.0);
    page.width.set(500.0);
    c.on_scroll();
    c.on_resize();
    c.on_items_changed(0..5);
    c.on_pointer_up();
    c.on_zoom_settled();
    assert_eq!(c.advance_to(10_000), 0);

    assert_eq!(c.stats(), stats);
    assert!(c.layout().is_none());
    assert!(c.scheduler().is_idle());
    assert!(c.committed_window().is_empty());

    // Idempotent and irreversible.
    c.destroy();
    assert_eq!(
        c.initialize(FakeElement(Rc::clone(&page)), FakeContainer(Rc::clone(&page))),
        Err(GridError::Destroyed)
    );
    assert_eq!(page.listener_count(), 0);
    assert_eq!(c.reconfigure(storefront_config()), Err(GridError::Destroyed));
}

#[test]
fn dropping_the_controller_unbinds() {
    let page = Page::new(1000.0);
    let (c, _zoom) = mounted_controller(&page, 42);
    assert_eq!(page.listener_count(), 1);
    drop(c);
    assert_eq!(page.listener_count(), 0);
}

#[test]
fn lifecycle_misuse_is_reported() {
    let page = Page::new(1000.0);
    let zoom = Rc::new(Cell::new(1.0));
    let mut c = new_controller(&zoom);

    assert_eq!(
        c.rebind(FakeElement(Rc::clone(&page)), FakeContainer(Rc::clone(&page))),
        Err(GridError::NotInitialized)
    );
    c.initialize(FakeElement(Rc::clone(&page)), FakeContainer(Rc::clone(&page)))
        .unwrap();
    assert_eq!(
        c.initialize(FakeElement(Rc::clone(&page)), FakeContainer(Rc::clone(&page))),
        Err(GridError::AlreadyInitialized)
    );
    assert_eq!(page.listener_count(), 1);
}

#[test]
fn remount_rebinds_to_the_new_container() {
    let old_page = Page::new(1000.0);
    let (mut c, _zoom) = mounted_controller(&old_page, 42);

    let new_page = Page::new(500.0);
    c.rebind(FakeElement(Rc::clone(&new_page)), FakeContainer(Rc::clone(&new_page)))
        .unwrap();

    assert_eq!(old_page.listener_count(), 0);
    assert_eq!(new_page.listener_count(), 1);
    assert_eq!(c.layout().unwrap().columns_per_row, 2);

    new_page.scroll_top.set(900.0);
    c.on_scroll();
    assert_eq!(c.scroll_state().scroll_top, 900.0);
}

#[test]
fn reconfigure_rejects_invalid_footprint() {
    let page = Page::new(1000.0);
    let (mut c, _zoom) = mounted_controller(&page, 42);

    let err = c.reconfigure(GridConfig::new(0.0, 450.0)).unwrap_err();
    assert!(matches!(err, GridError::Config(_)));
    assert_eq!(c.config().item_width, 245.0);

    c.reconfigure(GridConfig::new(200.0, 300.0)).unwrap();
    assert_eq!(c.layout().unwrap().columns_per_row, 5);
    assert_eq!(c.total_height(), 9.0 * 300.0);
}

#[test]
fn invalid_initial_config_degrades_to_one_column() {
    let page = Page::new(1000.0);
    let zoom = Rc::new(Cell::new(1.0));
    let mut c: TestController = GridController::new(
        GridConfig::new(-1.0, 450.0),
        ControllerOptions::default(),
        FakeZoom(zoom),
        ManualScheduler::new(),
    );
    c.on_items_changed(0..3);
    c.initialize(FakeElement(Rc::clone(&page)), FakeContainer(Rc::clone(&page)))
        .unwrap();
    assert_eq!(c.layout().unwrap().columns_per_row, 1);
}

#[test]
fn committed_items_are_keyed_and_positioned() {
    let page = Page::new(1000.0);
    let zoom = Rc::new(Cell::new(1.0));
    let mut c: GridController<&'static str, _, _, _, _> = GridController::new(
        storefront_config(),
        ControllerOptions::default(),
        FakeZoom(zoom),
        ManualScheduler::new(),
    );
    c.on_items_changed(["apples", "bread", "cheese", "dates", "eggs"]);
    c.initialize(FakeElement(Rc::clone(&page)), FakeContainer(Rc::clone(&page)))
        .unwrap();
    c.advance_to(0);

    let mut keyed = Vec::new();
    c.collect_committed_items_keyed(&mut keyed);
    assert_eq!(keyed.len(), 5);
    assert_eq!(keyed[4].key, "eggs");
    assert_eq!((keyed[4].top, keyed[4].left), (450.0, 0.0));
    assert_eq!(keyed[1].top, 0.0);
    assert!(keyed[1].left > 245.0);

    let mut placed: Vec<PlacedItem> = Vec::new();
    c.for_each_committed_item(|it| placed.push(it));
    assert_eq!(placed.len(), 5);
}

#[test]
fn randomized_event_streams_keep_windows_valid() {
    let mut rng = Lcg::new(7);
    for _ in 0..20 {
        let page = Page::new(1000.0);
        let (mut c, zoom) = mounted_controller(&page, 200);
        let mut last_commit: Option<u64> = None;

        for now in 0..600u64 {
            match rng.gen_range_u64(0, 10) {
                0 => {
                    let count = rng.gen_range_u64(0, 300);
                    c.on_items_changed(0..count);
                }
                1 => {
                    page.width.set(rng.gen_range_u64(0, 2000) as f64);
                    c.on_resize();
                }
                2 => {
                    zoom.set([1.0, 1.25, 1.5, 2.0][rng.gen_range_u64(0, 4) as usize]);
                    c.on_pointer_up();
                }
                _ => {
                    page.scroll_top.set(rng.gen_range_u64(0, 60_000) as f64);
                    c.on_scroll();
                }
            }

            if c.advance_to(now) > 0 {
                if let Some(prev) = last_commit {
                    assert!(now - prev >= 16, "commits at {prev} and {now}");
                }
                last_commit = Some(now);
            }

            if c.layout().is_some() {
                assert_within(c.committed_window(), c.item_count());
            } else {
                assert!(c.committed_window().is_empty());
            }
        }

        c.destroy();
        assert!(c.scheduler().is_idle());
        assert_eq!(page.listener_count(), 0);
    }
}

#[test]
fn render_loop_ignores_stale_frames_and_stops_idempotently() {
    let mut scheduler = ManualScheduler::new();
    let mut rl = RenderLoop::new(16);
    rl.start(&mut scheduler);
    rl.start(&mut scheduler);
    assert_eq!(scheduler.pending_frames(), 1);

    rl.set_target(VisibleWindow::new(0, 8));
    assert!(!rl.on_frame(FrameHandle(999), 0, &mut scheduler));
    assert!(rl.committed().is_empty());

    let fired = scheduler.advance_to(0);
    let Fired::Frame(handle) = fired[0] else {
        panic!("expected a frame, got {fired:?}");
    };
    assert!(rl.on_frame(handle, 0, &mut scheduler));
    assert_eq!(rl.committed(), VisibleWindow::new(0, 8));
    assert_eq!(rl.last_commit_ms(), Some(0));

    // Delivering the same handle twice does nothing.
    assert!(!rl.on_frame(handle, 100, &mut scheduler));

    rl.stop(&mut scheduler);
    rl.stop(&mut scheduler);
    assert!(!rl.is_running());
    assert!(scheduler.is_idle());
}

#[test]
fn render_loop_replaces_instead_of_merging() {
    let mut scheduler = ManualScheduler::new();
    let mut rl = RenderLoop::new(16);
    rl.start(&mut scheduler);

    fn frame(rl: &mut RenderLoop, s: &mut ManualScheduler, now: u64) -> bool {
        let mut committed = false;
        for f in s.advance_to(now) {
            if let Fired::Frame(h) = f {
                committed |= rl.on_frame(h, now, s);
            }
        }
        committed
    }

    rl.set_target(VisibleWindow::new(0, 40));
    assert!(frame(&mut rl, &mut scheduler, 0));
    rl.set_target(VisibleWindow::new(80, 120));
    assert!(!frame(&mut rl, &mut scheduler, 8));
    assert!(frame(&mut rl, &mut scheduler, 16));
    assert_eq!(rl.committed(), VisibleWindow::new(80, 120));

    rl.clamp_committed(100);
    assert_eq!(rl.committed(), VisibleWindow::new(80, 100));
    assert_eq!(rl.stats().commits, 2);
    assert_eq!(rl.stats().skipped_throttled, 1);
}

#[test]
fn zoom_monitor_detects_changes_after_baseline() {
    let mut zm = ZoomMonitor::new(300);
    assert!(!zm.check(1.0));
    assert_eq!(zm.last_ratio(), Some(1.0));
    assert!(!zm.check(1.0));
    assert!(zm.check(1.1));
    assert!(!zm.check(f64::NAN));
    assert!(!zm.check(0.0));
    assert_eq!(zm.last_ratio(), Some(1.1));

    let mut scheduler = ManualScheduler::new();
    zm.schedule_settle(&mut scheduler);
    zm.schedule_settle(&mut scheduler);
    assert_eq!(scheduler.pending_timers(), 1);
    assert!(zm.is_pending());

    let fired = scheduler.advance_to(300);
    assert_eq!(fired.len(), 1);
    let Fired::Timeout(handle) = fired[0] else {
        panic!("expected a timeout, got {fired:?}");
    };
    assert!(!zm.on_timeout(TimerHandle(handle.0 + 100)));
    assert!(zm.on_timeout(handle));
    assert!(!zm.is_pending());
}

#[test]
fn closures_are_zoom_sources() {
    let ratio = Rc::new(Cell::new(2.0));
    let source = {
        let ratio = Rc::clone(&ratio);
        move || ratio.get()
    };
    assert_eq!(source.poll_zoom_ratio(), 2.0);
    ratio.set(1.0);
    assert_eq!(source.poll_zoom_ratio(), 1.0);
}

#[test]
fn manual_scheduler_orders_timeouts_before_frames() {
    let mut s = ManualScheduler::new();
    let late = s.set_timeout(50);
    let early = s.set_timeout(10);
    let frame = s.request_frame();
    let cancelled = s.request_frame();
    s.cancel_frame(cancelled);

    assert_eq!(s.advance_to(5), alloc::vec![Fired::Frame(frame)]);
    assert_eq!(s.advance_to(60), alloc::vec![Fired::Timeout(early), Fired::Timeout(late)]);
    assert!(s.is_idle());

    let t = s.set_timeout(10);
    s.clear_timeout(t);
    assert!(s.advance_to(1_000).is_empty());
    assert_eq!(s.now_ms(), 1_000);
}

#[test]
fn manual_scheduler_clock_never_runs_backwards() {
    let mut s = ManualScheduler::new();
    s.advance_to(100);
    let immediate = s.set_timeout(0);
    let later = s.set_timeout(50);

    // An earlier timestamp still means "now" is 100.
    assert_eq!(s.advance_to(20), alloc::vec![Fired::Timeout(immediate)]);
    assert_eq!(s.now_ms(), 100);
    assert_eq!(s.pending_timers(), 1);

    assert!(s.advance_to(149).is_empty());
    assert_eq!(s.advance_to(150), alloc::vec![Fired::Timeout(later)]);
}

#[test]
fn scroll_binder_normalizes_and_unbinds() {
    let page = Page::new(1000.0);
    page.grid_offset.set(300.0);
    let mut binder =
        ScrollBinder::bind(FakeElement(Rc::clone(&page)), FakeContainer(Rc::clone(&page)));
    assert!(binder.is_bound());
    assert_eq!(GLOBAL_SCROLL_CONTAINER_CLASS, "global-scroll-container");
    assert_eq!(binder.grid_top(), Some(300.0));

    page.scroll_top.set(1000.0);
    assert_eq!(binder.scroll_state(), gridwindow::ScrollState::new(700.0, 800.0));
    page.scroll_top.set(100.0);
    assert_eq!(binder.scroll_state().scroll_top, 0.0);

    page.attached.set(false);
    assert_eq!(binder.scroll_state(), gridwindow::ScrollState::default());
    page.attached.set(true);
    page.mounted.set(false);
    assert_eq!(binder.grid_width(), None);
    assert_eq!(binder.scroll_state(), gridwindow::ScrollState::default());

    binder.unbind();
    binder.unbind();
    assert!(!binder.is_bound());
    assert_eq!(page.listener_count(), 0);
}

#[test]
fn snapshot_reflects_controller_state() {
    let page = Page::new(1000.0);
    let (mut c, _zoom) = mounted_controller(&page, 42);
    c.advance_to(0);

    let snap = c.snapshot();
    assert_eq!(snap.state, GridState::Ready);
    assert_eq!(snap.committed, VisibleWindow::new(0, 42));
    assert_eq!(snap.target, None);
    assert_eq!(snap.zoom_ratio, Some(1.0));
    assert_eq!(snap.stats.commits, 1);
    assert_eq!(snap.layout.map(|l| l.columns_per_row), Some(4));
}

#[test]
fn controller_options_defaults() {
    let options = ControllerOptions::default();
    assert_eq!(options.layout_buffer_rows, 3);
    assert_eq!(options.frame_interval_ms, 16);
    assert_eq!(options.zoom_debounce_ms, 300);

    let tuned = ControllerOptions::new()
        .with_layout_buffer_rows(4)
        .with_frame_interval_ms(8)
        .with_zoom_debounce_ms(150);
    assert_eq!(tuned.layout_buffer_rows, 4);
    assert_eq!(tuned.frame_interval_ms, 8);
    assert_eq!(tuned.zoom_debounce_ms, 150);
}

#[cfg(feature = "serde")]
#[test]
fn options_and_snapshots_serialize() {
    let options: ControllerOptions = serde_json::from_str(r#"{"frame_interval_ms":33}"#).unwrap();
    assert_eq!(options.frame_interval_ms, 33);
    assert_eq!(options.zoom_debounce_ms, 300);

    let page = Page::new(1000.0);
    let (mut c, _zoom) = mounted_controller(&page, 42);
    c.advance_to(0);
    let snap = c.snapshot();
    let json = serde_json::to_string(&snap).unwrap();
    let back: GridSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snap);
}
