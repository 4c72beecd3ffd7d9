use chrono::{DateTime, Duration, Local};

/// Result of advancing a countdown by one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Counting down (or frozen while paused) with this much time left
    Active(Duration),
    /// Reached zero on this tick. Reported exactly once per run.
    Finished,
    /// Not running at all
    Inactive,
}

/// Observable state of a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// A single countdown anchored to an absolute end time.
///
/// Remaining time is always recomputed from `end_time`, never decremented by a
/// frame delta, so irregular frame rates do not drift the countdown.
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    end_time: Option<DateTime<Local>>,
    total: Duration,
    running: bool,
    paused: bool,
    paused_remaining: Duration,
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self {
            end_time: None,
            total: Duration::zero(),
            running: false,
            paused: false,
            paused_remaining: Duration::zero(),
        }
    }

    /// Start counting down `minutes` from `now`.
    /// Ignored when already running or when `minutes` is zero.
    pub fn start(&mut self, minutes: u32, now: DateTime<Local>) {
        if self.running || minutes == 0 {
            return;
        }
        self.total = Duration::minutes(i64::from(minutes));
        self.end_time = Some(now + self.total);
        self.running = true;
        self.paused = false;
    }

    /// Freeze the remaining time
    pub fn pause(&mut self, now: DateTime<Local>) {
        if !self.running || self.paused {
            return;
        }
        if let Some(end) = self.end_time {
            // May be negative right at expiry; display code clamps.
            self.paused_remaining = end - now;
            self.paused = true;
        }
    }

    /// Continue from the frozen remaining time
    pub fn resume(&mut self, now: DateTime<Local>) {
        if !self.running || !self.paused {
            return;
        }
        self.end_time = Some(now + self.paused_remaining);
        self.paused = false;
    }

    /// Stop the countdown. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.running = false;
        self.paused = false;
        self.end_time = None;
    }

    /// Advance one evaluation step
    pub fn tick(&mut self, now: DateTime<Local>) -> Tick {
        if !self.running {
            return Tick::Inactive;
        }
        if self.paused {
            return Tick::Active(self.paused_remaining);
        }

        let Some(end) = self.end_time else {
            return Tick::Inactive;
        };
        let remaining = end - now;

        if remaining <= Duration::zero() {
            self.running = false;
            return Tick::Finished;
        }

        Tick::Active(remaining)
    }

    /// End time for overlay drawing. While paused this follows `now`, so the
    /// wedge keeps its size and rotates with the minute hand.
    pub fn end_time(&self, now: DateTime<Local>) -> Option<DateTime<Local>> {
        if self.paused {
            return Some(now + self.paused_remaining);
        }
        self.end_time
    }

    /// Remaining time for display, clamped at zero
    pub fn remaining(&self, now: DateTime<Local>) -> Duration {
        let remaining = match (self.running, self.paused, self.end_time) {
            (true, true, _) => self.paused_remaining,
            (true, false, Some(end)) => end - now,
            _ => Duration::zero(),
        };
        remaining.max(Duration::zero())
    }

    pub fn state(&self) -> TimerState {
        match (self.running, self.paused) {
            (false, _) => TimerState::Idle,
            (true, false) => TimerState::Running,
            (true, true) => TimerState::Paused,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

/// Format remaining time as `MM:SS`, rounding up to the next whole second.
/// Minutes are not wrapped at 60.
pub fn format_time(remaining: Duration) -> String {
    let ms = remaining.num_milliseconds();
    if ms <= 0 {
        return "00:00".to_string();
    }
    let total_seconds = (ms + 999) / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}
