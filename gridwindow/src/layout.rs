use crate::{GridConfig, Layout};

/// Computes the responsive grid layout for a container width and item count.
///
/// - `columns_per_row = max(1, floor(container_width / item_width))`
/// - `total_height = ceil(item_count / columns_per_row) * item_height`
///
/// The function is pure. Negative or non-finite inputs are treated as `0.0`; a zero item width
/// yields a single column and a zero item height yields a zero total height.
pub fn compute_layout(container_width: f64, item_count: usize, config: &GridConfig) -> Layout {
    if let Err(_err) = config.validate() {
        gwarn!(error = %_err, "compute_layout with invalid item footprint");
    }
    let container_width = non_negative(container_width);
    let item_width = non_negative(config.item_width);
    let item_height = non_negative(config.item_height);

    let columns_per_row = if item_width > 0.0 {
        floor_to_usize(container_width / item_width).max(1)
    } else {
        1
    };

    let rows = item_count.div_ceil(columns_per_row);
    let total_height = rows as f64 * item_height;

    let column_gap = if columns_per_row > 1 {
        let used = columns_per_row as f64 * item_width;
        ((container_width - used) / (columns_per_row - 1) as f64).max(0.0)
    } else {
        0.0
    };

    gtrace!(
        container_width,
        item_count,
        columns_per_row,
        total_height,
        "compute_layout"
    );

    Layout {
        container_width,
        columns_per_row,
        total_height,
        item_count,
        item_width,
        item_height,
        column_gap,
    }
}

pub(crate) fn non_negative(x: f64) -> f64 {
    if x.is_finite() && x > 0.0 { x } else { 0.0 }
}

/// `floor` for non-negative values without relying on `std` float intrinsics.
///
/// `as` truncates toward zero (which is `floor` for `x >= 0`) and saturates on overflow.
pub(crate) fn floor_to_usize(x: f64) -> usize {
    if x.is_nan() || x <= 0.0 {
        return 0;
    }
    x as usize
}

pub(crate) fn ceil_to_usize(x: f64) -> usize {
    let t = floor_to_usize(x);
    if (t as f64) < x { t.saturating_add(1) } else { t }
}
