/// Reasons a [`GridConfig`] is rejected by [`GridConfig::try_new`] / [`GridConfig::validate`].
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("item width must be a positive, finite number (got {0})")]
    InvalidItemWidth(f64),
    #[error("item height must be a positive, finite number (got {0})")]
    InvalidItemHeight(f64),
}

/// Per-item footprint and scroll buffer for one grid.
///
/// `buffer_rows` is the number of extra rows rendered above and below the viewport when a
/// window is recomputed from a scroll event.
///
/// Construction through [`GridConfig::new`] never fails: a zero or negative footprint degrades
/// to a single-column grid with no height instead of dividing by zero. Use
/// [`GridConfig::try_new`] to reject such values up front.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    pub item_width: f64,
    pub item_height: f64,
    pub buffer_rows: usize,
}

impl GridConfig {
    pub const DEFAULT_BUFFER_ROWS: usize = 2;

    pub fn new(item_width: f64, item_height: f64) -> Self {
        Self {
            item_width,
            item_height,
            buffer_rows: Self::DEFAULT_BUFFER_ROWS,
        }
    }

    pub fn try_new(item_width: f64, item_height: f64) -> Result<Self, ConfigError> {
        let config = Self::new(item_width, item_height);
        config.validate()?;
        Ok(config)
    }

    pub fn with_buffer_rows(mut self, buffer_rows: usize) -> Self {
        self.buffer_rows = buffer_rows;
        self
    }

    pub fn with_item_size(mut self, item_width: f64, item_height: f64) -> Self {
        self.item_width = item_width;
        self.item_height = item_height;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.item_width.is_finite() && self.item_width > 0.0) {
            return Err(ConfigError::InvalidItemWidth(self.item_width));
        }
        if !(self.item_height.is_finite() && self.item_height > 0.0) {
            return Err(ConfigError::InvalidItemHeight(self.item_height));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl Default for GridConfig {
    /// The storefront product card footprint.
    fn default() -> Self {
        Self::new(245.0, 450.0)
    }
}
