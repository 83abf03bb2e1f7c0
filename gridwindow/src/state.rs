/// Scroll geometry relative to the grid's own top edge.
///
/// `scroll_top` is how far the grid has been scrolled past the top of the viewport of its
/// ancestor scroll container (not the window/document). `viewport_height` is the visible
/// height of that container.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub scroll_top: f64,
    pub viewport_height: f64,
}

impl ScrollState {
    pub fn new(scroll_top: f64, viewport_height: f64) -> Self {
        Self {
            scroll_top,
            viewport_height,
        }
    }

    /// Returns a copy with negative or non-finite values replaced by `0.0`.
    pub fn sanitized(self) -> Self {
        Self {
            scroll_top: crate::layout::non_negative(self.scroll_top),
            viewport_height: crate::layout::non_negative(self.viewport_height),
        }
    }
}
