use super::color::Rgb;
use super::geometry::Point;

/// A 2D immediate-mode drawing surface.
///
/// Coordinates are logical units within `size()`, y pointing down.
/// Implementations map them onto whatever resolution the backend has.
pub trait Surface {
    /// `(width, height)` of the drawing area in logical units
    fn size(&self) -> (f64, f64);

    /// Erase everything drawn so far
    fn clear(&mut self);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgb);

    fn stroke_circle(&mut self, center: Point, radius: f64, color: Rgb, width: f64);

    fn line(&mut self, from: Point, to: Point, color: Rgb, width: f64);

    /// Filled pie slice from `start` to `end` (radians, clockwise)
    fn fill_wedge(&mut self, center: Point, radius: f64, start: f64, end: f64, color: Rgb);

    /// Outline of a pie slice
    fn stroke_wedge(&mut self, center: Point, radius: f64, start: f64, end: f64, color: Rgb, width: f64);

    /// Text centred on `at`
    fn text(&mut self, at: Point, text: &str, color: Rgb, background: Option<Rgb>);
}

/// One recorded drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    FillCircle { center: Point, radius: f64, color: Rgb },
    StrokeCircle { center: Point, radius: f64, color: Rgb, width: f64 },
    Line { from: Point, to: Point, color: Rgb, width: f64 },
    FillWedge { center: Point, radius: f64, start: f64, end: f64, color: Rgb },
    StrokeWedge { center: Point, radius: f64, start: f64, end: f64, color: Rgb, width: f64 },
    Text { at: Point, text: String, color: Rgb, background: Option<Rgb> },
}

/// A surface that records primitives in draw order, for a backend to replay
#[derive(Debug, Clone)]
pub struct DisplayList {
    width: f64,
    height: f64,
    shapes: Vec<Shape>,
}

impl DisplayList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }
}

impl Surface for DisplayList {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.shapes.clear();
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgb) {
        self.shapes.push(Shape::FillCircle { center, radius, color });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, color: Rgb, width: f64) {
        self.shapes.push(Shape::StrokeCircle { center, radius, color, width });
    }

    fn line(&mut self, from: Point, to: Point, color: Rgb, width: f64) {
        self.shapes.push(Shape::Line { from, to, color, width });
    }

    fn fill_wedge(&mut self, center: Point, radius: f64, start: f64, end: f64, color: Rgb) {
        self.shapes.push(Shape::FillWedge { center, radius, start, end, color });
    }

    fn stroke_wedge(&mut self, center: Point, radius: f64, start: f64, end: f64, color: Rgb, width: f64) {
        self.shapes.push(Shape::StrokeWedge { center, radius, start, end, color, width });
    }

    fn text(&mut self, at: Point, text: &str, color: Rgb, background: Option<Rgb>) {
        self.shapes.push(Shape::Text {
            at,
            text: text.to_string(),
            color,
            background,
        });
    }
}
