//! Cooperative rendering for hosts that own a UI loop.
//!
//! The host keeps the surface and calls [`RenderScheduler::run_slice`] when it
//! is idle; the scheduler never blocks for longer than its slice budget.
//!
//! # Architecture
//!
//! - **Input**: `DrawParameters` plus a shared surface per render
//! - **Output**: pixels on the `RasterSurface`, fault messages on the
//!   `ErrorMessagePort`, a `RenderSummary` to the completion callback
//! - **Core**: `RenderJob` from `core/actions` does the sweep

pub mod data;
pub mod scheduler;

pub use data::render_handle::{JobState, RenderHandle};
pub use data::render_summary::RenderSummary;
pub use scheduler::{CompletionCallback, RenderScheduler, SchedulerAction, SharedSurface};
