use super::color::Rgb;
use super::geometry::{
    hour_angle, minute_angle, minutes_to_sweep, numeral_angle, second_angle, tick_angle, Point,
};
use super::surface::Surface;
use chrono::{DateTime, Local};

/// Face background
pub const FACE_COLOR: Rgb = Rgb(0xfe, 0xfe, 0xfe);
const RIM_COLOR: Rgb = Rgb(0xcb, 0xd5, 0xe0);
const HOUR_TICK_COLOR: Rgb = Rgb(0x4a, 0x55, 0x68);
const MINUTE_TICK_COLOR: Rgb = Rgb(0xcb, 0xd5, 0xe0);
const HOUR_HAND_COLOR: Rgb = Rgb(0x2d, 0x37, 0x48);
const MINUTE_HAND_COLOR: Rgb = Rgb(0x4a, 0x55, 0x68);
const SECOND_HAND_COLOR: Rgb = Rgb(0xe5, 0x3e, 0x3e);
const NUMERAL_TEXT_COLOR: Rgb = Rgb(0xff, 0xff, 0xff);
/// Used when an overlay colour can't be parsed
const FALLBACK_OVERLAY_COLOR: Rgb = Rgb(0x4a, 0x90, 0xd9);

/// Disc colour behind each hour numeral, 1 through 12
pub const NUMERAL_COLORS: [Rgb; 12] = [
    Rgb(0xe5, 0x3e, 0x3e),
    Rgb(0xdd, 0x6b, 0x20),
    Rgb(0xd6, 0x9e, 0x2e),
    Rgb(0x38, 0xa1, 0x69),
    Rgb(0x31, 0x97, 0x95),
    Rgb(0x31, 0x82, 0xce),
    Rgb(0x5a, 0x67, 0xd8),
    Rgb(0x80, 0x5a, 0xd5),
    Rgb(0xb8, 0x32, 0x80),
    Rgb(0xe5, 0x3e, 0x3e),
    Rgb(0xdd, 0x6b, 0x20),
    Rgb(0xd6, 0x9e, 0x2e),
];

/// Overlay fill opacity over the face
const OVERLAY_FILL_ALPHA: f64 = 0.25;
/// Overlay outline opacity over the face
const OVERLAY_STROKE_ALPHA: f64 = 0.5;

/// Time block drawn on the face for one running timer
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub start_time: DateTime<Local>,
    pub end_time: DateTime<Local>,
    /// CSS colour of the owning task
    pub color: String,
}

impl Overlay {
    pub fn new(start_time: DateTime<Local>, end_time: DateTime<Local>, color: impl Into<String>) -> Self {
        Self {
            start_time,
            end_time,
            color: color.into(),
        }
    }
}

/// Angular extent of an overlay wedge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge {
    /// Where the wedge begins: the minute hand at `now`
    pub start: f64,
    /// Clockwise extent in radians, one turn = 60 minutes
    pub sweep: f64,
}

impl Wedge {
    pub fn end(&self) -> f64 {
        self.start + self.sweep
    }
}

/// Wedge for `overlay` at `now`, or `None` once its end time has passed
pub fn overlay_wedge(overlay: &Overlay, now: &DateTime<Local>) -> Option<Wedge> {
    if *now >= overlay.end_time {
        return None;
    }
    let remaining_ms = (overlay.end_time - *now).num_milliseconds() as f64;
    Some(Wedge {
        start: minute_angle(now),
        sweep: minutes_to_sweep(remaining_ms / 60_000.0),
    })
}

/// Proportions of the face, relative to its radius
struct Dimensions {
    center: Point,
    radius: f64,
}

impl Dimensions {
    /// Centred in the area, sized by its shorter side
    fn for_size((width, height): (f64, f64)) -> Self {
        Self {
            center: Point::new(width / 2.0, height / 2.0),
            radius: width.min(height) / 2.0 * 0.94,
        }
    }
}

/// Draws a 12-hour analog face with a coloured wedge per running timer
#[derive(Debug, Clone, Default)]
pub struct ClockRenderer {
    overlays: Vec<Overlay>,
}

impl ClockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all overlays
    pub fn set_overlays(&mut self, overlays: Vec<Overlay>) {
        self.overlays = overlays;
    }

    /// Replace all overlays with a single one
    pub fn set_overlay(&mut self, start_time: DateTime<Local>, end_time: DateTime<Local>, color: &str) {
        self.overlays = vec![Overlay::new(start_time, end_time, color)];
    }

    pub fn clear_overlay(&mut self) {
        self.overlays.clear();
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    /// Erase and redraw the whole clock for `now`
    pub fn render<S: Surface>(&self, surface: &mut S, now: DateTime<Local>) {
        let dims = Dimensions::for_size(surface.size());

        surface.clear();
        Self::draw_face(surface, &dims);
        self.draw_overlays(surface, &dims, &now);
        Self::draw_hands(surface, &dims, &now);
    }

    fn draw_face<S: Surface>(surface: &mut S, dims: &Dimensions) {
        let (c, r) = (dims.center, dims.radius);

        surface.fill_circle(c, r, FACE_COLOR);
        surface.stroke_circle(c, r, RIM_COLOR, 3.0);

        for i in 0..60 {
            let angle = tick_angle(i);
            let is_hour = i % 5 == 0;
            let inner = if is_hour { r * 0.87 } else { r * 0.93 };
            let (color, width) = if is_hour {
                (HOUR_TICK_COLOR, 2.5)
            } else {
                (MINUTE_TICK_COLOR, 1.0)
            };
            surface.line(c.polar(inner, angle), c.polar(r * 0.97, angle), color, width);
        }

        for n in 1..=12u32 {
            let at = c.polar(r * 0.75, numeral_angle(n));
            let disc = NUMERAL_COLORS[(n - 1) as usize];
            surface.fill_circle(at, r * 0.09, disc);
            surface.text(at, &n.to_string(), NUMERAL_TEXT_COLOR, Some(disc));
        }
    }

    fn draw_overlays<S: Surface>(&self, surface: &mut S, dims: &Dimensions, now: &DateTime<Local>) {
        let r = dims.radius * 0.85;

        for overlay in self.overlays() {
            let Some(wedge) = overlay_wedge(overlay, now) else {
                continue;
            };
            let color = Rgb::parse_or(&overlay.color, FALLBACK_OVERLAY_COLOR);
            surface.fill_wedge(
                dims.center,
                r,
                wedge.start,
                wedge.end(),
                color.over(FACE_COLOR, OVERLAY_FILL_ALPHA),
            );
            surface.stroke_wedge(
                dims.center,
                r,
                wedge.start,
                wedge.end(),
                color.over(FACE_COLOR, OVERLAY_STROKE_ALPHA),
                2.0,
            );
        }
    }

    fn draw_hands<S: Surface>(surface: &mut S, dims: &Dimensions, now: &DateTime<Local>) {
        let (c, r) = (dims.center, dims.radius);

        let hands = [
            (hour_angle(now), 0.5, 5.0, HOUR_HAND_COLOR),
            (minute_angle(now), 0.7, 3.0, MINUTE_HAND_COLOR),
            (second_angle(now), 0.75, 1.5, SECOND_HAND_COLOR),
        ];
        for (angle, length, width, color) in hands {
            surface.line(c, c.polar(r * length, angle), color, width);
        }

        surface.fill_circle(c, r * 0.035, HOUR_HAND_COLOR);
    }
}
