pub mod color;
pub mod geometry;
pub mod renderer;
pub mod surface;

pub use color::Rgb;
pub use geometry::Point;
pub use renderer::{ClockRenderer, Overlay};
pub use surface::{DisplayList, Shape};
