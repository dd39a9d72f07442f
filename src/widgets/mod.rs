// filepath: src/widgets/mod.rs
//! Built-in widgets for hypr-clock

pub mod analog;
pub mod text;

pub use analog::AnalogClock;
pub use text::TextClock;
