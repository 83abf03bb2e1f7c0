//! Frame-paced controller, scroll binding and zoom invalidation for the `gridwindow` crate.
//!
//! The `gridwindow` crate is pure geometry. This crate adds the parts that depend on time and
//! on the host UI, behind small ports the host implements:
//!
//! - [`Scheduler`]: frame and timeout callbacks (`requestAnimationFrame`, `setTimeout`)
//! - [`ZoomSource`]: the current device pixel ratio
//! - [`GridElement`] / [`ScrollContainer`]: measurements of the grid and its scroll ancestor
//!
//! On top of those it provides the [`RenderLoop`] (at most one commit per frame interval,
//! latest target wins), the debounced [`ZoomMonitor`], the [`ScrollBinder`] and the
//! [`GridController`] that wires them into an initialize → observe → recompute → destroy
//! lifecycle. [`ManualScheduler`] drives everything deterministically in tests and headless
//! simulations.
//!
//! This crate is framework-agnostic (no DOM or widget-toolkit bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod error;
mod options;
mod render_loop;
mod scheduler;
mod scroll;
mod zoom;

#[cfg(test)]
mod tests;

pub use controller::{GridController, GridSnapshot, GridState};
pub use error::GridError;
pub use options::ControllerOptions;
pub use render_loop::{RenderLoop, RenderStats};
pub use scheduler::{Fired, FrameHandle, ManualScheduler, Scheduler, TimerHandle};
pub use scroll::{
    GLOBAL_SCROLL_CONTAINER_CLASS, GridElement, ListenerId, ScrollBinder, ScrollContainer,
};
pub use zoom::{ZoomMonitor, ZoomSource};

pub use gridwindow::GridKey;
