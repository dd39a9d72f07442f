// filepath: src/widget/interface.rs
//! Widget interface definitions
//!
//! This file defines the trait every clock widget implements and the small
//! value types passed between the host and the widgets.

use crate::draw::Canvas;

/// Size of a surface in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Backing size for a logical size at the given device pixel ratio,
    /// rounded to the nearest pixel
    pub fn from_logical(width: u32, height: u32, scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        Self {
            width: (f64::from(width) * scale).round() as u32,
            height: (f64::from(height) * scale).round() as u32,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn stride(&self) -> u32 {
        self.width * 4
    }

    /// Bytes of ARGB8888 storage, saturating instead of wrapping
    pub fn byte_len(&self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

/// Counters describing how much work a widget has done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefreshStats {
    /// Times the layer dimensions were changed
    pub surface_resizes: u64,
    /// Times the static face was repainted
    pub face_redraws: u64,
    /// Times the dynamic layer was repainted
    pub hand_redraws: u64,
    /// Times the widget drew anything at all
    pub draws: u64,
}

/// Core trait that all clock widgets implement
pub trait Widget {
    /// Get the unique identifier for this widget
    fn id(&self) -> &str;

    /// Get the human-readable name of this widget
    fn name(&self) -> &str;

    /// Called once the host knows the surface size; performs the first draw
    fn attach(&mut self, size: PixelSize);

    /// Bring the widget up to date for `size`. Returns true if any layer
    /// content changed.
    fn refresh(&mut self, size: PixelSize) -> bool;

    /// Composite the widget's layers onto the output canvas
    fn compose(&self, target: &mut Canvas);

    /// Whether the widget wants a new frame after every present
    fn animates(&self) -> bool {
        false
    }

    fn stats(&self) -> RefreshStats;
}
