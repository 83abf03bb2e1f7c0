/// Timing and buffering knobs for [`crate::GridController`].
///
/// The item footprint and the scroll-path buffer live in [`gridwindow::GridConfig`]; these
/// options cover everything the controller adds on top.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerOptions {
    /// Buffer rows used when the window is recomputed after a relayout (resize, item change,
    /// zoom). Larger than the scroll-path buffer to pre-render ahead of anticipated scrolling.
    pub layout_buffer_rows: usize,
    /// Minimum time between two commits of the rendered window.
    pub frame_interval_ms: u64,
    /// How long the device pixel ratio must stay unchanged before a zoom relayout runs.
    pub zoom_debounce_ms: u64,
}

impl ControllerOptions {
    pub const DEFAULT_LAYOUT_BUFFER_ROWS: usize = 3;
    pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;
    pub const DEFAULT_ZOOM_DEBOUNCE_MS: u64 = 300;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout_buffer_rows(mut self, rows: usize) -> Self {
        self.layout_buffer_rows = rows;
        self
    }

    pub fn with_frame_interval_ms(mut self, interval_ms: u64) -> Self {
        self.frame_interval_ms = interval_ms;
        self
    }

    pub fn with_zoom_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.zoom_debounce_ms = debounce_ms;
        self
    }
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            layout_buffer_rows: Self::DEFAULT_LAYOUT_BUFFER_ROWS,
            frame_interval_ms: Self::DEFAULT_FRAME_INTERVAL_MS,
            zoom_debounce_ms: Self::DEFAULT_ZOOM_DEBOUNCE_MS,
        }
    }
}
