use core::ops;

/// Derived grid geometry for one (container width, item count, footprint) combination.
///
/// Produced by [`crate::compute_layout`]. A default (all-zero) layout is "not established":
/// window queries against it return an empty window.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    pub container_width: f64,
    /// Always `>= 1` for layouts built by `compute_layout`.
    pub columns_per_row: usize,
    pub total_height: f64,
    pub item_count: usize,
    pub item_width: f64,
    pub item_height: f64,
    /// Horizontal space between adjacent columns, so that columns span the container
    /// edge-to-edge.
    pub column_gap: f64,
}

impl Layout {
    /// Returns `true` when window and position queries can be answered.
    pub fn is_established(&self) -> bool {
        self.columns_per_row > 0 && self.item_height > 0.0 && self.item_height.is_finite()
    }

    pub fn row_count(&self) -> usize {
        if self.columns_per_row == 0 {
            return 0;
        }
        self.item_count.div_ceil(self.columns_per_row)
    }

    pub fn row_of(&self, index: usize) -> usize {
        index / self.columns_per_row.max(1)
    }

    pub fn column_of(&self, index: usize) -> usize {
        index % self.columns_per_row.max(1)
    }
}

/// Top/left offset of one item, relative to the grid's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionEntry {
    pub top: f64,
    pub left: f64,
}

/// A contiguous, half-open index range `[start_index, end_index)` of items to materialize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleWindow {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl VisibleWindow {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
    };

    pub fn new(start_index: usize, end_index: usize) -> Self {
        debug_assert!(
            start_index <= end_index,
            "VisibleWindow: inverted range ({start_index}..{end_index})"
        );
        Self {
            start_index,
            end_index: end_index.max(start_index),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }

    pub fn range(&self) -> ops::Range<usize> {
        self.start_index..self.end_index.max(self.start_index)
    }

    /// Trims the window so it never reaches past `item_count`.
    pub fn clamp_to(self, item_count: usize) -> Self {
        let end_index = self.end_index.min(item_count);
        Self {
            start_index: self.start_index.min(end_index),
            end_index,
        }
    }
}

/// An item index together with the position it should be rendered at.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedItem {
    pub index: usize,
    pub top: f64,
    pub left: f64,
}

impl PlacedItem {
    pub fn position(&self) -> crate::PositionEntry {
        crate::PositionEntry {
            top: self.top,
            left: self.left,
        }
    }
}

/// Like [`PlacedItem`], with the item's stable identity key for keyed rendering.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedItemKeyed<K> {
    pub key: K,
    pub index: usize,
    pub top: f64,
    pub left: f64,
}
