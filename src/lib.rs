pub mod app;
pub mod config;
pub mod draw;
pub mod frame;
pub mod geometry;
pub mod surface;
pub mod time;
mod wayland;
pub mod widget;
pub mod widgets;

pub use crate::draw::Canvas;
pub use crate::widget::{PixelSize, Widget};
