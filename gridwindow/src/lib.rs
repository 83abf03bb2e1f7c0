//! A headless windowing engine for virtualized, responsive multi-column grids.
//!
//! For the frame-paced controller, scroll binding and zoom invalidation, see the
//! `gridwindow-adapter` crate.
//!
//! Given a container width, a fixed per-item footprint and an item count, this crate answers
//! three questions:
//! - how many columns fit and how tall the content is ([`compute_layout`]),
//! - where each item goes ([`PositionCache`]),
//! - which row-aligned slice of items must be materialized for a scroll position
//!   ([`compute_window`]).
//!
//! It is UI-agnostic: it emits index → position pairs, never markup, and never inspects the
//! items themselves.
//!
//! ```rust
//! use gridwindow::{GridConfig, PositionCache, ScrollState, compute_layout, compute_window};
//!
//! let config = GridConfig::new(245.0, 450.0).with_buffer_rows(2);
//! let layout = compute_layout(1000.0, 42, &config);
//! assert_eq!(layout.columns_per_row, 4);
//! assert_eq!(layout.total_height, 4950.0);
//!
//! let mut cache = PositionCache::new();
//! cache.build(&layout, 42);
//!
//! let window = compute_window(ScrollState::new(900.0, 800.0), &layout, config.buffer_rows);
//! assert_eq!((window.start_index, window.end_index), (0, 40));
//! assert_eq!(cache.lookup(5, &layout).top, 450.0);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod config;
mod key;
mod layout;
mod position;
mod state;
mod types;
mod window;


pub use config::{ConfigError, GridConfig};
pub use key::{GridKey, first_duplicate_key};
pub use layout::compute_layout;
pub use position::{PositionCache, fallback_position, position_of};
pub use state::ScrollState;
pub use types::{Layout, PlacedItem, PlacedItemKeyed, PositionEntry, VisibleWindow};
pub use window::{compute_window, for_each_placed_item, for_each_placed_item_keyed};
