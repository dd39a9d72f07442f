// filepath: src/widgets/analog.rs
//! Analog clock widget
//!
//! The face (ring and ticks) lives in its own layer and is only repainted
//! when the pixel size changes. The hands layer is cleared and repainted on
//! every refresh.

use crate::config::{FaceStyle, HandStyle};
use crate::draw::{Canvas, Color};
use crate::geometry::{self, Dial};
use crate::surface::RasterLayer;
use crate::time::{ClockReading, TimeSource};
use crate::widget::{PixelSize, RefreshStats, Widget};
use log::debug;

pub struct AnalogClock {
    id: String,
    name: String,
    face_style: FaceStyle,
    hand_style: HandStyle,
    offset_minutes: Option<i64>,
    time: Box<dyn TimeSource>,
    face: RasterLayer,
    hands: RasterLayer,
    last_size: Option<PixelSize>,
    stats: RefreshStats,
}

impl AnalogClock {
    pub fn new(
        face_style: FaceStyle,
        hand_style: HandStyle,
        offset_minutes: Option<i64>,
        time: Box<dyn TimeSource>,
    ) -> Self {
        Self {
            id: "analog".to_string(),
            name: "Analog clock".to_string(),
            face_style,
            hand_style,
            offset_minutes,
            time,
            face: RasterLayer::new(),
            hands: RasterLayer::new(),
            last_size: None,
            stats: RefreshStats::default(),
        }
    }

    fn draw_face(&mut self) {
        let style = &self.face_style;
        let mut canvas = self.face.canvas();
        canvas.clear();
        let dial = Dial::new(canvas.width(), canvas.height());

        canvas.stroke_circle(
            dial.center,
            dial.face_radius(),
            dial.line_width(geometry::RING_WIDTH_UNITS),
            style.outline_color,
        );
        canvas.fill_circle(dial.center, dial.face_radius(), style.fill_color);

        for tick in geometry::ticks() {
            let color = if tick.long {
                style.long_tick_color
            } else {
                style.short_tick_color
            };
            let segment = dial.radial_segment(
                tick.fraction,
                tick.start_radius(),
                geometry::TICK_END_RADIUS,
            );
            canvas.stroke_segment(segment, dial.line_width(tick.width_units()), color);
        }
    }

    fn draw_hands(&mut self, reading: ClockReading) {
        let style = &self.hand_style;
        let mut canvas = self.hands.canvas();
        canvas.clear();
        let dial = Dial::new(canvas.width(), canvas.height());

        draw_hand(
            &mut canvas,
            &dial,
            reading.hour_fraction(),
            (geometry::HOUR_HAND_START_RADIUS, geometry::HOUR_HAND_END_RADIUS),
            geometry::HOUR_HAND_WIDTH_UNITS,
            style.hour_color,
        );
        draw_hand(
            &mut canvas,
            &dial,
            reading.minute_fraction(),
            (geometry::MINUTE_HAND_START_RADIUS, geometry::MINUTE_HAND_END_RADIUS),
            geometry::MINUTE_HAND_WIDTH_UNITS,
            style.minute_color,
        );
        draw_hand(
            &mut canvas,
            &dial,
            reading.second_fraction(),
            (geometry::SECOND_HAND_START_RADIUS, geometry::SECOND_HAND_END_RADIUS),
            geometry::SECOND_HAND_WIDTH_UNITS,
            style.second_color,
        );
    }
}

fn draw_hand(
    canvas: &mut Canvas,
    dial: &Dial,
    fraction: f64,
    (start_radius, end_radius): (f32, f32),
    width_units: f32,
    color: Color,
) {
    let segment = dial.radial_segment(fraction as f32, start_radius, end_radius);
    canvas.stroke_segment(segment, dial.line_width(width_units), color);
}

impl Widget for AnalogClock {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn attach(&mut self, size: PixelSize) {
        self.refresh(size);
    }

    fn refresh(&mut self, size: PixelSize) -> bool {
        let hands_resized = self.hands.resize(size);
        let face_resized = self.face.resize(size);
        if hands_resized || face_resized {
            debug!("AnalogClock: layers resized to {}x{}", size.width, size.height);
            self.stats.surface_resizes += 1;
        }

        if size.is_empty() {
            self.last_size = Some(size);
            return false;
        }

        let reading = ClockReading::now(self.time.as_ref(), self.offset_minutes);

        if self.last_size != Some(size) {
            self.draw_face();
            self.stats.face_redraws += 1;
        }
        self.last_size = Some(size);

        self.draw_hands(reading);
        self.stats.hand_redraws += 1;
        self.stats.draws += 1;
        true
    }

    fn compose(&self, target: &mut Canvas) {
        self.face.composite_onto(target);
        self.hands.composite_onto(target);
    }

    fn animates(&self) -> bool {
        true
    }

    fn stats(&self) -> RefreshStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{FixedClock, MS_PER_HOUR, MS_PER_MINUTE};
    use pretty_assertions::assert_eq;

    // 2024-05-01T00:00:00Z
    const MIDNIGHT_UTC: i64 = 1_714_521_600_000;

    fn clock_at(ms_of_day: u32) -> AnalogClock {
        let time = FixedClock {
            utc_millis: MIDNIGHT_UTC + i64::from(ms_of_day),
            local_offset_minutes: 0,
        };
        AnalogClock::new(
            FaceStyle::default(),
            HandStyle::default(),
            None,
            Box::new(time),
        )
    }

    fn bgra(color: Color) -> [u8; 4] {
        [color[2], color[1], color[0], color[3]]
    }

    fn pixel(layer: &mut RasterLayer, x: f32, y: f32) -> Option<[u8; 4]> {
        layer.canvas().pixel(x as u32, y as u32)
    }

    #[test]
    fn face_is_redrawn_once_per_distinct_size() {
        let mut clock = clock_at(0);
        let small = PixelSize::new(200, 200);
        let large = PixelSize::new(400, 300);

        clock.attach(small);
        for _ in 0..5 {
            clock.refresh(small);
        }
        assert_eq!(
            clock.stats(),
            RefreshStats {
                surface_resizes: 1,
                face_redraws: 1,
                hand_redraws: 6,
                draws: 6,
            }
        );

        clock.refresh(large);
        clock.refresh(large);
        clock.refresh(small);
        let stats = clock.stats();
        assert_eq!(stats.surface_resizes, 3);
        assert_eq!(stats.face_redraws, 3);
        assert_eq!(stats.hand_redraws, 9);
    }

    #[test]
    fn empty_size_draws_nothing() {
        let mut clock = clock_at(0);
        assert!(!clock.refresh(PixelSize::new(0, 100)));
        assert_eq!(clock.stats().face_redraws, 0);
        assert_eq!(clock.stats().hand_redraws, 0);

        assert!(clock.refresh(PixelSize::new(100, 100)));
        assert_eq!(clock.stats().face_redraws, 1);
    }

    #[test]
    fn long_and_short_ticks_use_their_colors() {
        let mut clock = clock_at(0);
        clock.attach(PixelSize::new(400, 400));
        let style = FaceStyle::default();
        let radius = (geometry::LONG_TICK_START_RADIUS + geometry::TICK_END_RADIUS) / 2.0 * 400.0;

        // 12 o'clock carries a long tick
        assert_eq!(
            pixel(&mut clock.face, 200.0, 200.0 - radius),
            Some(bgra(style.long_tick_color))
        );
        // one minute past carries a short tick
        let short = Dial::new(400, 400).radial_segment(
            1.0 / 60.0,
            geometry::SHORT_TICK_START_RADIUS,
            geometry::TICK_END_RADIUS,
        );
        let mid_x = (short.start.x + short.end.x) / 2.0;
        let mid_y = (short.start.y + short.end.y) / 2.0;
        assert_eq!(
            pixel(&mut clock.face, mid_x, mid_y),
            Some(bgra(style.short_tick_color))
        );
        // the face is filled between center and ticks, transparent outside
        assert_eq!(
            pixel(&mut clock.face, 200.0, 200.0),
            Some(bgra(style.fill_color))
        );
        assert_eq!(pixel(&mut clock.face, 1.0, 1.0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn hands_point_at_the_current_time() {
        // 03:00:15 -> hour and second hands at 3 o'clock, minute hand just
        // past 12 o'clock
        let mut clock = clock_at(3 * MS_PER_HOUR + 15_000);
        clock.attach(PixelSize::new(400, 400));
        let hands = HandStyle::default();

        // beyond the hour hand's reach, only the second hand remains
        assert_eq!(
            pixel(&mut clock.hands, 200.0 + 0.33 * 400.0, 200.0),
            Some(bgra(hands.second_color))
        );
        let (nx, ny) = geometry::direction(15.0 / 3600.0);
        assert_eq!(
            pixel(&mut clock.hands, 200.0 + nx * 0.33 * 400.0, 200.0 + ny * 0.33 * 400.0),
            Some(bgra(hands.minute_color))
        );
        // nothing points to 9 o'clock
        assert_eq!(
            pixel(&mut clock.hands, 200.0 - 0.2 * 400.0, 200.0),
            Some([0, 0, 0, 0])
        );
    }

    #[test]
    fn hands_move_between_refreshes() {
        let mut clock = clock_at(0);
        let size = PixelSize::new(300, 300);
        clock.attach(size);
        let before = clock.hands.pixels().to_vec();

        clock.time = Box::new(FixedClock {
            utc_millis: MIDNIGHT_UTC + i64::from(20 * MS_PER_MINUTE + 20_000),
            local_offset_minutes: 0,
        });
        clock.refresh(size);
        assert_ne!(clock.hands.pixels(), before.as_slice());
        assert_eq!(clock.stats().face_redraws, 1);
    }

    #[test]
    fn offset_overrides_local_zone() {
        let time = FixedClock {
            utc_millis: MIDNIGHT_UTC + i64::from(10 * MS_PER_HOUR),
            local_offset_minutes: -240,
        };
        let mut offset = AnalogClock::new(
            FaceStyle::default(),
            HandStyle::default(),
            Some(90),
            Box::new(time),
        );
        // 11:30 local: the minute hand points straight down
        offset.attach(PixelSize::new(400, 400));
        assert_eq!(
            pixel(&mut offset.hands, 200.0, 200.0 + 0.33 * 400.0),
            Some(bgra(HandStyle::default().minute_color))
        );
    }

    #[test]
    fn compose_puts_hands_over_face() {
        let mut clock = clock_at(15_000);
        let size = PixelSize::new(400, 400);
        clock.attach(size);
        let mut out = vec![0; size.byte_len()];
        let mut canvas = Canvas::new(&mut out, size.width, size.height);
        clock.compose(&mut canvas);
        let second = bgra(HandStyle::default().second_color);
        assert_eq!(canvas.pixel(332, 200), Some(second));
        assert_eq!(canvas.pixel(200, 300), Some(bgra(FaceStyle::default().fill_color)));
    }
}
