// filepath: src/geometry.rs
//! Clock face geometry
//!
//! All radii are fractions of the shorter side of the canvas. Positions on
//! the dial are fractions of a full circle, clockwise from 12 o'clock.

use std::f32::consts::TAU;

pub const SHORT_TICK_START_RADIUS: f32 = 0.405;
pub const LONG_TICK_START_RADIUS: f32 = 0.349;
pub const TICK_END_RADIUS: f32 = 0.4618;
pub const SECOND_HAND_START_RADIUS: f32 = -0.06;
pub const SECOND_HAND_END_RADIUS: f32 = 0.375;
pub const MINUTE_HAND_START_RADIUS: f32 = -0.06;
pub const MINUTE_HAND_END_RADIUS: f32 = 0.375;
pub const HOUR_HAND_START_RADIUS: f32 = -0.06;
pub const HOUR_HAND_END_RADIUS: f32 = 0.27;

/// Ratio of the face circle radius to half the canvas size
pub const FACE_RADIUS_SCALE: f32 = 0.98;

pub const TICK_COUNT: u32 = 5 * 12;
pub const TICKS_PER_HOUR_MARK: u32 = 5;

/// Line widths, in units of `size / 2700`
pub const RING_WIDTH_UNITS: f32 = 2.0;
pub const LONG_TICK_WIDTH_UNITS: f32 = 42.0;
pub const SHORT_TICK_WIDTH_UNITS: f32 = 27.0;
pub const HOUR_HAND_WIDTH_UNITS: f32 = 27.0;
pub const MINUTE_HAND_WIDTH_UNITS: f32 = 27.0;
pub const SECOND_HAND_WIDTH_UNITS: f32 = 15.0;

const LINE_WIDTH_DIVISOR: f32 = 2700.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn length(&self) -> f32 {
        (self.end.x - self.start.x).hypot(self.end.y - self.start.y)
    }
}

/// Center, shorter side and derived measures of a canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dial {
    pub center: Point,
    pub size: f32,
}

impl Dial {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            center: Point {
                x: width as f32 / 2.0,
                y: height as f32 / 2.0,
            },
            size: width.min(height) as f32,
        }
    }

    pub fn face_radius(&self) -> f32 {
        self.size / 2.0 * FACE_RADIUS_SCALE
    }

    pub fn line_width(&self, units: f32) -> f32 {
        self.size / LINE_WIDTH_DIVISOR * units
    }

    /// Segment along the ray at `fraction` between two radii
    pub fn radial_segment(&self, fraction: f32, start_radius: f32, end_radius: f32) -> Segment {
        let (nx, ny) = direction(fraction);
        let start = start_radius * self.size;
        let end = end_radius * self.size;
        Segment {
            start: Point {
                x: self.center.x + nx * start,
                y: self.center.y + ny * start,
            },
            end: Point {
                x: self.center.x + nx * end,
                y: self.center.y + ny * end,
            },
        }
    }
}

/// Unit vector pointing at `fraction` of a turn clockwise from 12 o'clock,
/// in screen coordinates (y grows downwards)
pub fn direction(fraction: f32) -> (f32, f32) {
    let angle = fraction * TAU;
    (angle.sin(), -angle.cos())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub index: u32,
    pub fraction: f32,
    pub long: bool,
}

impl Tick {
    pub fn start_radius(&self) -> f32 {
        if self.long {
            LONG_TICK_START_RADIUS
        } else {
            SHORT_TICK_START_RADIUS
        }
    }

    pub fn width_units(&self) -> f32 {
        if self.long {
            LONG_TICK_WIDTH_UNITS
        } else {
            SHORT_TICK_WIDTH_UNITS
        }
    }
}

/// The 60 minute marks; every fifth one is long
pub fn ticks() -> impl Iterator<Item = Tick> {
    (0..TICK_COUNT).map(|index| Tick {
        index,
        fraction: index as f32 / TICK_COUNT as f32,
        long: index % TICKS_PER_HOUR_MARK == 0,
    })
}
