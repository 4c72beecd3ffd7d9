use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Colour given to new tasks
pub const DEFAULT_TASK_COLOR: &str = "#4A90D9";

/// Duration pre-filled in the new task form, in minutes
pub const DEFAULT_TASK_MINUTES: u32 = 15;

/// Swatches offered by the task form colour picker
pub const TASK_COLORS: [&str; 8] = [
    "#4A90D9", "#E53E3E", "#DD6B20", "#D69E2E", "#38A169", "#319795", "#805AD5", "#B83280",
];

/// A task with a countdown length and a colour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Stable ID for internal references (not persisted)
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    /// Countdown length in minutes, at least 1
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    /// CSS colour string such as `#4A90D9`
    pub color: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(name: String, duration_minutes: u32, color: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            duration_minutes: duration_minutes.max(1),
            color,
            completed: false,
        }
    }
}
