// filepath: src/draw.rs
//! Drawing utilities for hypr-clock
//!
//! A small anti-aliased software rasterizer over ARGB8888 pixel memory, the
//! format handed out by the shm pool. Pixels are stored little-endian
//! (B, G, R, A) with premultiplied alpha. Colors are given as `[r, g, b, a]`.

use crate::geometry::{Point, Segment};
use fontdue::layout::{
    CoordinateSystem, HorizontalAlign, Layout, LayoutSettings, TextStyle, VerticalAlign,
};

pub type Color = [u8; 4];

const BYTES_PER_PIXEL: usize = 4;

/// Canvas abstraction over a raw ARGB8888 buffer
pub struct Canvas<'a> {
    buffer: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    /// Create a new canvas from a raw buffer
    pub fn new(buffer: &'a mut [u8], width: u32, height: u32) -> Self {
        debug_assert!(buffer.len() >= width as usize * height as usize * BYTES_PER_PIXEL);
        Self {
            buffer,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Make every pixel fully transparent
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Premultiplied pixel at (x, y) as `[b, g, r, a]`
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) as usize * BYTES_PER_PIXEL;
        let mut px = [0; 4];
        px.copy_from_slice(&self.buffer[idx..idx + BYTES_PER_PIXEL]);
        Some(px)
    }

    /// Blend `color` over the pixel at (x, y) with the given coverage
    fn blend(&mut self, x: u32, y: u32, color: Color, coverage: f32) {
        if coverage <= 0.0 || x >= self.width || y >= self.height {
            return;
        }
        let alpha = f32::from(color[3]) / 255.0 * coverage.min(1.0);
        let idx = (y * self.width + x) as usize * BYTES_PER_PIXEL;
        let src = [
            f32::from(color[2]) * alpha,
            f32::from(color[1]) * alpha,
            f32::from(color[0]) * alpha,
            255.0 * alpha,
        ];
        let keep = 1.0 - alpha;
        for (dst, src) in self.buffer[idx..idx + BYTES_PER_PIXEL].iter_mut().zip(src) {
            *dst = (src + f32::from(*dst) * keep).round().min(255.0) as u8;
        }
    }

    /// Clamp a floating point box to pixel index ranges
    fn pixel_bounds(
        &self,
        min_x: f32,
        min_y: f32,
        max_x: f32,
        max_y: f32,
    ) -> Option<(u32, u32, u32, u32)> {
        let x0 = min_x.floor().max(0.0) as u32;
        let y0 = min_y.floor().max(0.0) as u32;
        let x1 = (max_x.ceil().max(0.0) as u32).min(self.width);
        let y1 = (max_y.ceil().max(0.0) as u32).min(self.height);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some((x0, y0, x1, y1))
    }

    /// Fill a disc
    pub fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        let reach = radius + 1.0;
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(
            center.x - reach,
            center.y - reach,
            center.x + reach,
            center.y + reach,
        ) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let d = (x as f32 + 0.5 - center.x).hypot(y as f32 + 0.5 - center.y);
                let coverage = (radius - d + 0.5).clamp(0.0, 1.0);
                self.blend(x, y, color, coverage);
            }
        }
    }

    /// Stroke a circle outline centered on `radius`
    pub fn stroke_circle(&mut self, center: Point, radius: f32, line_width: f32, color: Color) {
        if line_width <= 0.0 {
            return;
        }
        let half = line_width / 2.0;
        let reach = radius + half + 1.0;
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(
            center.x - reach,
            center.y - reach,
            center.x + reach,
            center.y + reach,
        ) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let d = (x as f32 + 0.5 - center.x).hypot(y as f32 + 0.5 - center.y);
                let coverage = (half - (d - radius).abs() + 0.5).min(line_width);
                self.blend(x, y, color, coverage.clamp(0.0, 1.0));
            }
        }
    }

    /// Stroke a straight segment with butt caps
    pub fn stroke_segment(&mut self, segment: Segment, line_width: f32, color: Color) {
        let length = segment.length();
        if length <= f32::EPSILON || line_width <= 0.0 {
            return;
        }
        let ux = (segment.end.x - segment.start.x) / length;
        let uy = (segment.end.y - segment.start.y) / length;
        let half = line_width / 2.0;
        let reach = half + 1.0;
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(
            segment.start.x.min(segment.end.x) - reach,
            segment.start.y.min(segment.end.y) - reach,
            segment.start.x.max(segment.end.x) + reach,
            segment.start.y.max(segment.end.y) + reach,
        ) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let px = x as f32 + 0.5 - segment.start.x;
                let py = y as f32 + 0.5 - segment.start.y;
                let along = px * ux + py * uy;
                let across = (px * uy - py * ux).abs();
                let along_cov = (along.min(length - along) + 0.5).clamp(0.0, 1.0);
                let across_cov = (half - across + 0.5).min(line_width).clamp(0.0, 1.0);
                self.blend(x, y, color, along_cov * across_cov);
            }
        }
    }

    /// Composite a premultiplied ARGB8888 layer over this canvas, anchored at
    /// the top-left corner and clipped to the smaller of the two
    pub fn composite(&mut self, src: &[u8], src_width: u32, src_height: u32) {
        let width = self.width.min(src_width) as usize;
        let height = self.height.min(src_height) as usize;
        for y in 0..height {
            let dst_row = y * self.width as usize * BYTES_PER_PIXEL;
            let src_row = y * src_width as usize * BYTES_PER_PIXEL;
            for x in 0..width {
                let d = dst_row + x * BYTES_PER_PIXEL;
                let s = src_row + x * BYTES_PER_PIXEL;
                let src_px = &src[s..s + BYTES_PER_PIXEL];
                let src_alpha = src_px[3];
                if src_alpha == 0 {
                    continue;
                }
                let dst_px = &mut self.buffer[d..d + BYTES_PER_PIXEL];
                if src_alpha == 255 {
                    dst_px.copy_from_slice(src_px);
                    continue;
                }
                let keep = 1.0 - f32::from(src_alpha) / 255.0;
                for (dst, src) in dst_px.iter_mut().zip(src_px) {
                    *dst = (f32::from(*src) + f32::from(*dst) * keep).round().min(255.0) as u8;
                }
            }
        }
    }

    /// Composite a premultiplied ARGB8888 layer stretched over the whole
    /// canvas with bilinear sampling. Same-size layers are copied pixel for
    /// pixel.
    pub fn composite_scaled(&mut self, src: &[u8], src_width: u32, src_height: u32) {
        if src_width == self.width && src_height == self.height {
            self.composite(src, src_width, src_height);
            return;
        }
        if src_width == 0 || src_height == 0 {
            return;
        }
        let scale_x = src_width as f32 / self.width as f32;
        let scale_y = src_height as f32 / self.height as f32;
        let sample = |x: u32, y: u32| -> [f32; 4] {
            let s = (y * src_width + x) as usize * BYTES_PER_PIXEL;
            [
                f32::from(src[s]),
                f32::from(src[s + 1]),
                f32::from(src[s + 2]),
                f32::from(src[s + 3]),
            ]
        };
        for y in 0..self.height {
            let sy = ((y as f32 + 0.5) * scale_y - 0.5).clamp(0.0, (src_height - 1) as f32);
            let y0 = sy.floor() as u32;
            let y1 = (y0 + 1).min(src_height - 1);
            let fy = sy - y0 as f32;
            for x in 0..self.width {
                let sx = ((x as f32 + 0.5) * scale_x - 0.5).clamp(0.0, (src_width - 1) as f32);
                let x0 = sx.floor() as u32;
                let x1 = (x0 + 1).min(src_width - 1);
                let fx = sx - x0 as f32;
                let (p00, p10) = (sample(x0, y0), sample(x1, y0));
                let (p01, p11) = (sample(x0, y1), sample(x1, y1));
                let mut px = [0.0; 4];
                for c in 0..BYTES_PER_PIXEL {
                    let top = p00[c] + (p10[c] - p00[c]) * fx;
                    let bottom = p01[c] + (p11[c] - p01[c]) * fx;
                    px[c] = top + (bottom - top) * fy;
                }
                if px[3] <= 0.0 {
                    continue;
                }
                let keep = 1.0 - px[3] / 255.0;
                let d = (y * self.width + x) as usize * BYTES_PER_PIXEL;
                for (dst, src) in self.buffer[d..d + BYTES_PER_PIXEL].iter_mut().zip(px) {
                    *dst = (src + f32::from(*dst) * keep).round().clamp(0.0, 255.0) as u8;
                }
            }
        }
    }

    /// Draw a single line of text centered on the canvas
    pub fn draw_text_centered(&mut self, font: &fontdue::Font, text: &str, px: f32, color: Color) {
        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings {
            max_width: Some(self.width as f32),
            max_height: Some(self.height as f32),
            horizontal_align: HorizontalAlign::Center,
            vertical_align: VerticalAlign::Middle,
            ..LayoutSettings::default()
        });
        layout.append(&[font], &TextStyle::new(text, px, 0));

        for glyph in layout.glyphs() {
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }
            let (metrics, bitmap) = font.rasterize_config(glyph.key);
            let origin_x = glyph.x.round() as i64;
            let origin_y = glyph.y.round() as i64;
            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let coverage = bitmap[row * metrics.width + col];
                    let x = origin_x + col as i64;
                    let y = origin_y + row as i64;
                    if coverage == 0 || x < 0 || y < 0 {
                        continue;
                    }
                    self.blend(x as u32, y as u32, color, f32::from(coverage) / 255.0);
                }
            }
        }
    }
}
