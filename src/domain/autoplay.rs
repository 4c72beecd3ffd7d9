use crate::ticker::{countdown_step, COUNTDOWN_START};
use chrono::{DateTime, Local};
use uuid::Uuid;

/// Outcome of polling the autoplay countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    /// Next step not due yet
    Waiting,
    /// Stepped down to this number
    Counted(u8),
    /// Reached zero, start the task now
    Done,
}

/// 3-2-1 countdown before a task starts automatically.
///
/// Steps once per second on its own deadline, however often it is polled.
#[derive(Debug, Clone)]
pub struct AutoplayCountdown {
    task: Uuid,
    count: u8,
    next_step: DateTime<Local>,
}

impl AutoplayCountdown {
    pub fn new(task: Uuid, now: DateTime<Local>) -> Self {
        Self {
            task,
            count: COUNTDOWN_START,
            next_step: now + countdown_step(),
        }
    }

    /// Task that starts when the countdown reaches zero
    pub fn task(&self) -> Uuid {
        self.task
    }

    /// Display text such as `3...`
    pub fn label(&self) -> String {
        format!("{}...", self.count)
    }

    pub fn poll(&mut self, now: DateTime<Local>) -> CountdownStep {
        if now < self.next_step || self.count == 0 {
            return CountdownStep::Waiting;
        }
        self.count -= 1;
        self.next_step = self.next_step + countdown_step();
        if self.count == 0 {
            CountdownStep::Done
        } else {
            CountdownStep::Counted(self.count)
        }
    }
}
