use std::time::Duration;

/// Redraw interval in milliseconds
pub const DEFAULT_FRAME_MS: u64 = 100;

/// Autoplay countdown step in milliseconds
pub const COUNTDOWN_STEP_MS: i64 = 1000;

/// Number shown first by the autoplay countdown
pub const COUNTDOWN_START: u8 = 3;

/// Get frame duration
pub fn frame_duration() -> Duration {
    Duration::from_millis(DEFAULT_FRAME_MS)
}

/// Interval between autoplay countdown steps
pub fn countdown_step() -> chrono::Duration {
    chrono::Duration::milliseconds(COUNTDOWN_STEP_MS)
}
