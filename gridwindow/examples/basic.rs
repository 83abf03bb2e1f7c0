// Example: layout, position cache and the visible window for a product grid.
use gridwindow::{
    GridConfig, PositionCache, ScrollState, compute_layout, compute_window, for_each_placed_item,
};

fn main() {
    let config = GridConfig::new(245.0, 450.0);
    let layout = compute_layout(1000.0, 10_000, &config);
    println!(
        "columns={} gap={:.2} total_height={}",
        layout.columns_per_row, layout.column_gap, layout.total_height
    );

    let mut cache = PositionCache::new();
    cache.build(&layout, layout.item_count);

    for scroll_top in [0.0, 4_600.0, 1_000_000.0, 5_000_000.0] {
        let scroll = ScrollState::new(scroll_top, 800.0);
        let window = compute_window(scroll, &layout, config.buffer_rows);
        let mut first = None;
        for_each_placed_item(window, &layout, &cache, |it| {
            first.get_or_insert(it);
        });
        println!("scroll_top={scroll_top} window={window:?} first={first:?}");
    }
}
