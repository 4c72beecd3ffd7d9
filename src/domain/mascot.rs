use chrono::{DateTime, Duration, Local};

/// How long a celebration lasts, in milliseconds
pub const CELEBRATION_MS: i64 = 1500;

/// The buddy character: blinks idly and jumps for joy when a task finishes
#[derive(Debug, Clone, Default)]
pub struct Mascot {
    celebrating_until: Option<DateTime<Local>>,
    /// Animation frame counter (increments every frame)
    pub frame: u32,
}

impl Mascot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a celebration
    pub fn celebrate(&mut self, now: DateTime<Local>) {
        self.celebrating_until = Some(now + Duration::milliseconds(CELEBRATION_MS));
    }

    pub fn is_celebrating(&self, now: DateTime<Local>) -> bool {
        self.celebrating_until.is_some_and(|until| now < until)
    }

    /// Advance the animation and drop a finished celebration
    pub fn tick(&mut self, now: DateTime<Local>) {
        if !self.is_celebrating(now) {
            self.celebrating_until = None;
        }
        self.frame = self.frame.wrapping_add(1);
    }
}
