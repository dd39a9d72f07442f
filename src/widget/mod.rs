// filepath: src/widget/mod.rs
//! Widget system for hypr-clock
//!
//! This is the main entry point for the widget system.
//! It re-exports the core trait and types, and builds the configured widget.

pub mod interface;
mod registry;

pub use interface::{PixelSize, RefreshStats, Widget};
pub use registry::build_widget;
