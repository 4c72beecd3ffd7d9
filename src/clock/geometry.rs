//! Angle math for the clock face.
//!
//! Angles use screen convention: 0 points at 3 o'clock and positive angles turn
//! clockwise (y grows downward). Every dial angle is offset by a quarter turn so
//! that zero on the dial sits at 12 o'clock.

use chrono::{DateTime, Local, Timelike};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Angle of 12 o'clock
pub const TOP: f64 = -FRAC_PI_2;

/// A point in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `self` in direction `angle`
    pub fn polar(&self, radius: f64, angle: f64) -> Point {
        Point::new(self.x + angle.cos() * radius, self.y + angle.sin() * radius)
    }
}

fn fraction_to_angle(fraction: f64) -> f64 {
    fraction * TAU + TOP
}

fn millis(now: &DateTime<Local>) -> f64 {
    // Leap seconds report nanoseconds past 1e9
    f64::from((now.nanosecond() / 1_000_000).min(999))
}

/// Hour hand position on the 12-hour dial
pub fn hour_angle(now: &DateTime<Local>) -> f64 {
    let hours = f64::from(now.hour() % 12);
    let minutes = f64::from(now.minute());
    fraction_to_angle((hours + minutes / 60.0) / 12.0)
}

/// Minute hand position on the 60-minute dial
pub fn minute_angle(now: &DateTime<Local>) -> f64 {
    let minutes = f64::from(now.minute());
    let seconds = f64::from(now.second());
    fraction_to_angle((minutes + seconds / 60.0) / 60.0)
}

/// Second hand position, smoothed by milliseconds
pub fn second_angle(now: &DateTime<Local>) -> f64 {
    let seconds = f64::from(now.second());
    fraction_to_angle((seconds + millis(now) / 1000.0) / 60.0)
}

/// Angle of minute tick `i` (0..60)
pub fn tick_angle(i: u32) -> f64 {
    fraction_to_angle(f64::from(i) / 60.0)
}

/// Angle of hour numeral `n` (1..=12)
pub fn numeral_angle(n: u32) -> f64 {
    fraction_to_angle(f64::from(n) / 12.0)
}

/// Sweep in radians for `remaining_minutes` on the 60-minute dial, capped at one turn
pub fn minutes_to_sweep(remaining_minutes: f64) -> f64 {
    (remaining_minutes / 60.0 * TAU).clamp(0.0, TAU)
}
