pub mod autoplay;
pub mod enums;
pub mod form;
pub mod mascot;
pub mod task;
pub mod timer;

pub use autoplay::{AutoplayCountdown, CountdownStep};
pub use enums::{FormField, UiMode};
pub use form::TaskForm;
pub use mascot::Mascot;
pub use task::{Task, TASK_COLORS};
pub use timer::{format_time, CountdownTimer, Tick, TimerState};
