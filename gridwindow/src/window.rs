use crate::layout::{ceil_to_usize, floor_to_usize};
use crate::{Layout, PlacedItem, PlacedItemKeyed, PositionCache, ScrollState, VisibleWindow};

/// Computes which items must be materialized for a scroll position.
///
/// ```text
/// start_row    = floor(scroll_top / item_height)
/// visible_rows = ceil(viewport_height / item_height) + 2 * buffer_rows
/// start_index  = max(0, (start_row - buffer_rows) * columns_per_row)
/// end_index    = min(item_count, (start_row + visible_rows + buffer_rows) * columns_per_row)
/// ```
///
/// Both bounds are multiples of `columns_per_row`, except that `end_index` may equal
/// `item_count` on a partial last row. When scrolled past the content the result is the empty
/// window `[item_count, item_count)`. An empty window is also returned when the layout is not
/// established or has no items.
///
/// The result depends only on the arguments.
pub fn compute_window(scroll: ScrollState, layout: &Layout, buffer_rows: usize) -> VisibleWindow {
    let columns = layout.columns_per_row;
    let count = layout.item_count;
    if count == 0 || !layout.is_established() {
        return VisibleWindow::EMPTY;
    }

    let scroll = scroll.sanitized();
    let item_height = layout.item_height;

    let start_row = floor_to_usize(scroll.scroll_top / item_height);
    let visible_rows = ceil_to_usize(scroll.viewport_height / item_height)
        .saturating_add(buffer_rows.saturating_mul(2));

    let start_index = start_row.saturating_sub(buffer_rows).saturating_mul(columns);
    let end_index = start_row
        .saturating_add(visible_rows)
        .saturating_add(buffer_rows)
        .saturating_mul(columns)
        .min(count);

    let window = VisibleWindow {
        start_index: start_index.min(end_index),
        end_index,
    };
    gtrace!(
        scroll_top = scroll.scroll_top,
        viewport_height = scroll.viewport_height,
        buffer_rows,
        start_index = window.start_index,
        end_index = window.end_index,
        "compute_window"
    );
    window
}

/// Calls `f` with the position of every index in `window`, in ascending order.
///
/// Indices at or past `layout.item_count` are skipped.
pub fn for_each_placed_item(
    window: VisibleWindow,
    layout: &Layout,
    cache: &PositionCache,
    mut f: impl FnMut(PlacedItem),
) {
    let window = window.clamp_to(layout.item_count);
    for index in window.range() {
        let pos = cache.lookup(index, layout);
        f(PlacedItem {
            index,
            top: pos.top,
            left: pos.left,
        });
    }
}

/// Keyed variant of [`for_each_placed_item`]. Indices without a key are skipped.
pub fn for_each_placed_item_keyed<K: Clone>(
    window: VisibleWindow,
    layout: &Layout,
    cache: &PositionCache,
    keys: &[K],
    mut f: impl FnMut(PlacedItemKeyed<K>),
) {
    let window = window.clamp_to(layout.item_count.min(keys.len()));
    for index in window.range() {
        let pos = cache.lookup(index, layout);
        f(PlacedItemKeyed {
            key: keys[index].clone(),
            index,
            top: pos.top,
            left: pos.left,
        });
    }
}
