use std::cell::Cell;
use std::rc::Rc;

use gridwindow::GridConfig;
use gridwindow_adapter::{
    ControllerOptions, GridController, GridElement, ListenerId, ManualScheduler, ScrollContainer,
};

// A headless page: one scroll container holding a header and the grid below it.
#[derive(Debug)]
struct Page {
    width: Cell<f64>,
    scroll_top: Cell<f64>,
    header_height: f64,
}

#[derive(Clone, Debug)]
struct Grid(Rc<Page>);

impl GridElement for Grid {
    fn is_mounted(&self) -> bool {
        true
    }

    fn width(&self) -> f64 {
        self.0.width.get()
    }

    fn client_top(&self) -> f64 {
        self.0.header_height - self.0.scroll_top.get()
    }
}

#[derive(Clone, Debug)]
struct Container(Rc<Page>);

impl ScrollContainer for Container {
    fn is_attached(&self) -> bool {
        true
    }

    fn scroll_top(&self) -> f64 {
        self.0.scroll_top.get()
    }

    fn viewport_height(&self) -> f64 {
        800.0
    }

    fn client_top(&self) -> f64 {
        0.0
    }

    fn add_scroll_listener(&self) -> ListenerId {
        ListenerId(1)
    }

    fn remove_scroll_listener(&self, _id: ListenerId) {}
}

fn main() {
    // Example: drive a controller through a fling, a filter and a zoom without any UI.
    //
    // A browser host would:
    // - forward scroll/resize/pointerup/keyup events to the controller
    // - forward requestAnimationFrame/setTimeout callbacks via on_frame/on_timeout
    // - render the committed window, absolutely positioned, inside a spacer of total_height
    let page = Rc::new(Page {
        width: Cell::new(1000.0),
        scroll_top: Cell::new(0.0),
        header_height: 320.0,
    });
    let zoom = Rc::new(Cell::new(1.0));

    let mut c = GridController::new(
        GridConfig::new(245.0, 450.0),
        ControllerOptions::default(),
        {
            let zoom = Rc::clone(&zoom);
            move || zoom.get()
        },
        ManualScheduler::new(),
    );
    c.on_items_changed((0..5_000u32).map(|sku| format!("sku-{sku:05}")));
    if let Err(err) = c.initialize(Grid(Rc::clone(&page)), Container(Rc::clone(&page))) {
        eprintln!("initialize failed: {err}");
        return;
    }
    println!("total_height={}", c.total_height());

    let mut now_ms = 0u64;
    for step in 0..120u64 {
        now_ms += 4;
        page.scroll_top.set((step * step) as f64 * 15.0);
        c.on_scroll();
        if c.advance_to(now_ms) > 0 {
            println!("t={now_ms} committed={:?}", c.committed_window());
        }
    }

    c.on_items_changed((0..30u32).map(|sku| format!("sku-{sku:05}")));
    println!("after filter: committed={:?}", c.committed_window());

    page.width.set(800.0);
    zoom.set(1.25);
    c.on_pointer_up();
    now_ms += 400;
    c.advance_to(now_ms);
    println!(
        "after zoom: columns={:?} total_height={}",
        c.layout().map(|l| l.columns_per_row),
        c.total_height()
    );

    let mut items = Vec::new();
    c.collect_committed_items_keyed(&mut items);
    for it in items.iter().take(4) {
        println!("{} @ top={} left={:.1}", it.key, it.top, it.left);
    }

    c.destroy();
    println!("destroyed: idle={}", c.scheduler().is_idle());
}
