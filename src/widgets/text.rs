// filepath: src/widgets/text.rs
//! Text placeholder widget
//!
//! Draws the word "Clock" centered on its layer, once. It never animates.
//! Later size changes stretch the layer over the new buffer instead of
//! redrawing it.

use crate::config::TextStyle;
use crate::draw::Canvas;
use crate::surface::RasterLayer;
use crate::widget::{PixelSize, RefreshStats, Widget};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub const PLACEHOLDER_TEXT: &str = "Clock";

/// Sans-serif faces tried when no font is configured
const FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
];

pub struct TextClock {
    id: String,
    name: String,
    style: TextStyle,
    font: Option<fontdue::Font>,
    layer: RasterLayer,
    stats: RefreshStats,
}

impl TextClock {
    pub fn new(style: TextStyle) -> Self {
        let font = load_font(style.font_path.as_deref());
        Self::with_font(style, font)
    }

    pub fn with_font(style: TextStyle, font: Option<fontdue::Font>) -> Self {
        Self {
            id: "text".to_string(),
            name: "Text clock".to_string(),
            style,
            font,
            layer: RasterLayer::new(),
            stats: RefreshStats::default(),
        }
    }

    fn draw(&mut self) {
        let mut canvas = self.layer.canvas();
        canvas.clear();
        match &self.font {
            Some(font) => canvas.draw_text_centered(
                font,
                PLACEHOLDER_TEXT,
                self.style.font_size,
                self.style.color,
            ),
            None => warn!("TextClock: no font available, drawing nothing"),
        }
        self.stats.draws += 1;
    }
}

/// Load the configured font, or the first fallback that parses
pub fn load_font(configured: Option<&Path>) -> Option<fontdue::Font> {
    let candidates: Vec<PathBuf> = match configured {
        Some(path) => vec![path.to_path_buf()],
        None => FALLBACK_FONTS.iter().map(PathBuf::from).collect(),
    };

    for path in candidates {
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(_) => continue,
        };
        match fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()) {
            Ok(font) => {
                info!("Loaded font {}", path.display());
                return Some(font);
            }
            Err(e) => warn!("Failed to parse font {}: {}", path.display(), e),
        }
    }

    warn!("No usable font found");
    None
}

impl Widget for TextClock {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn attach(&mut self, size: PixelSize) {
        if self.stats.draws > 0 {
            return;
        }
        if self.layer.resize(size) {
            self.stats.surface_resizes += 1;
        }
        self.draw();
    }

    fn refresh(&mut self, _size: PixelSize) -> bool {
        false
    }

    fn compose(&self, target: &mut Canvas) {
        self.layer.composite_onto(target);
    }

    fn stats(&self) -> RefreshStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn draws_exactly_once() {
        let mut text = TextClock::with_font(TextStyle::default(), None);
        assert!(!text.animates());
        text.attach(PixelSize::new(300, 100));
        assert!(!text.refresh(PixelSize::new(600, 200)));
        text.attach(PixelSize::new(600, 200));
        assert!(!text.refresh(PixelSize::new(300, 100)));

        let stats = text.stats();
        assert_eq!(stats.draws, 1);
        assert_eq!(stats.surface_resizes, 1);
        assert_eq!(stats.face_redraws, 0);
        assert_eq!(text.layer.size(), PixelSize::new(300, 100));
    }

    #[test]
    fn missing_font_file_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_font(Some(dir.path().join("missing.ttf").as_path())).is_none());

        let junk = dir.path().join("junk.ttf");
        fs::write(&junk, b"not a font").unwrap();
        assert!(load_font(Some(junk.as_path())).is_none());
    }

    /// Bounding-box center of every inked pixel in a BGRA buffer
    fn ink_center(pixels: &[u8], width: usize) -> Option<(usize, usize)> {
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (usize::MAX, 0, usize::MAX, 0);
        for (i, px) in pixels.chunks_exact(4).enumerate() {
            if px[3] == 0 {
                continue;
            }
            let (x, y) = (i % width, i / width);
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        (max_x > min_x).then(|| ((min_x + max_x) / 2, (min_y + max_y) / 2))
    }

    #[test]
    fn text_stays_centered_after_the_scale_doubles() {
        let Some(font) = load_font(None) else {
            // no system font to render with
            return;
        };
        let mut text = TextClock::with_font(TextStyle::default(), Some(font));
        text.attach(PixelSize::from_logical(400, 200, 1.0));
        let doubled = PixelSize::from_logical(400, 200, 2.0);
        text.refresh(doubled);
        assert_eq!(text.stats().draws, 1);

        let mut buffer = vec![0; doubled.byte_len()];
        let mut canvas = Canvas::new(&mut buffer, doubled.width, doubled.height);
        text.compose(&mut canvas);

        let (mid_x, mid_y) =
            ink_center(&buffer, doubled.width as usize).expect("nothing was drawn");
        assert!(mid_x.abs_diff(400) < 40, "horizontal center {mid_x}");
        assert!(mid_y.abs_diff(200) < 50, "vertical center {mid_y}");
    }

    #[test]
    fn text_is_centered_when_a_font_is_present() {
        let Some(font) = load_font(None) else {
            // no system font to render with
            return;
        };
        let mut text = TextClock::with_font(TextStyle::default(), Some(font));
        let size = PixelSize::new(400, 200);
        text.attach(size);

        let (mid_x, mid_y) =
            ink_center(text.layer.pixels(), size.width as usize).expect("nothing was drawn");
        assert!(mid_x.abs_diff(200) < 20, "horizontal center {mid_x}");
        assert!(mid_y.abs_diff(100) < 25, "vertical center {mid_y}");
    }
}
