// filepath: src/surface.rs
//! Offscreen raster layers
//!
//! Widgets keep their static and dynamic content in separate layers so the
//! static part only has to be repainted when the pixel size changes.

use crate::draw::Canvas;
use crate::widget::PixelSize;

/// An owned ARGB8888 pixel buffer
#[derive(Debug, Default)]
pub struct RasterLayer {
    size: PixelSize,
    pixels: Vec<u8>,
}

impl RasterLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> PixelSize {
        self.size
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Resize to `size`, clearing the contents. Returns false and keeps the
    /// contents when the size is unchanged.
    pub fn resize(&mut self, size: PixelSize) -> bool {
        if self.size == size {
            return false;
        }
        self.size = size;
        self.pixels.clear();
        self.pixels.resize(size.byte_len(), 0);
        true
    }

    pub fn canvas(&mut self) -> Canvas<'_> {
        Canvas::new(&mut self.pixels, self.size.width, self.size.height)
    }

    /// Composite this layer over `target`, stretched to cover it when the
    /// target's pixel size differs from the layer's
    pub fn composite_onto(&self, target: &mut Canvas) {
        target.composite_scaled(&self.pixels, self.size.width, self.size.height);
    }
}
