use alloc::vec::Vec;

use crate::{Layout, PositionEntry};

/// Exact position of `index` within `layout`.
///
/// `top = row * item_height`, `left = column * (item_width + column_gap)`.
pub fn position_of(index: usize, layout: &Layout) -> PositionEntry {
    let top = layout.row_of(index) as f64 * layout.item_height;
    let left = layout.column_of(index) as f64 * (layout.item_width + layout.column_gap);
    PositionEntry { top, left }
}

/// Best-effort position used before the cache has been rebuilt for `index`.
///
/// Columns are assumed to split the container evenly, which is close enough to keep a
/// just-inserted item from rendering at `(0, 0)`.
pub fn fallback_position(index: usize, layout: &Layout) -> PositionEntry {
    let columns = layout.columns_per_row.max(1);
    let top = layout.row_of(index) as f64 * layout.item_height;
    let left = layout.column_of(index) as f64 * (layout.container_width / columns as f64);
    PositionEntry { top, left }
}

/// Memoized index → position mapping for one layout.
///
/// The cache is always rebuilt wholesale when the layout changes; there is no incremental
/// patching. The cost is `O(item_count)`, which is bounded by the size of one result page.
#[derive(Clone, Debug, Default)]
pub struct PositionCache {
    entries: Vec<PositionEntry>,
    built_for: Option<Layout>,
}

impl PositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds every entry for `item_count` items laid out by `layout`.
    pub fn build(&mut self, layout: &Layout, item_count: usize) {
        self.entries.clear();
        self.entries.reserve_exact(item_count);
        for index in 0..item_count {
            self.entries.push(position_of(index, layout));
        }
        self.built_for = Some(*layout);
        gdebug!(
            item_count,
            columns_per_row = layout.columns_per_row,
            "PositionCache::build"
        );
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.built_for = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the cache was last built for exactly this layout.
    pub fn is_built_for(&self, layout: &Layout) -> bool {
        self.built_for.as_ref() == Some(layout)
    }

    /// Returns the cached entry, if any.
    pub fn get(&self, index: usize) -> Option<PositionEntry> {
        self.entries.get(index).copied()
    }

    /// Returns the cached entry, or a fallback computed from `layout` when `index` has not been
    /// cached yet.
    pub fn lookup(&self, index: usize, layout: &Layout) -> PositionEntry {
        match self.entries.get(index) {
            Some(entry) => *entry,
            None => {
                gtrace!(index, "PositionCache::lookup fallback");
                fallback_position(index, layout)
            }
        }
    }
}
