use super::enums::FormField;
use super::task::{DEFAULT_TASK_COLOR, DEFAULT_TASK_MINUTES, TASK_COLORS};
use thiserror::Error;
use uuid::Uuid;

/// Reasons a task form submission is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("task name is empty")]
    EmptyName,
    #[error("duration must be a whole number of minutes, at least 1")]
    InvalidDuration,
}

impl FormError {
    /// Field that gets focus back after the rejection
    pub fn field(&self) -> FormField {
        match self {
            Self::EmptyName => FormField::Name,
            Self::InvalidDuration => FormField::Duration,
        }
    }

    /// Translation key for the message shown in the form
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::EmptyName => "modal.errorName",
            Self::InvalidDuration => "modal.errorDuration",
        }
    }
}

/// State of the add/edit task form
#[derive(Debug, Clone)]
pub struct TaskForm {
    /// Task being edited, `None` when adding
    pub editing: Option<Uuid>,
    pub name: String,
    /// Raw duration text as typed
    pub duration: String,
    pub color: String,
    pub field: FormField,
    pub error: Option<FormError>,
}

impl TaskForm {
    pub fn new_task() -> Self {
        Self {
            editing: None,
            name: String::new(),
            duration: DEFAULT_TASK_MINUTES.to_string(),
            color: DEFAULT_TASK_COLOR.to_string(),
            field: FormField::Name,
            error: None,
        }
    }

    pub fn edit(id: Uuid, name: &str, duration_minutes: u32, color: &str) -> Self {
        Self {
            editing: Some(id),
            name: name.to_string(),
            duration: duration_minutes.to_string(),
            color: color.to_string(),
            field: FormField::Name,
            error: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Clear the form for the next new task, keeping it open
    pub fn reset(&mut self) {
        *self = Self::new_task();
    }

    pub fn add_char(&mut self, c: char) {
        match self.field {
            FormField::Name => self.name.push(c),
            FormField::Duration if c.is_ascii_digit() => self.duration.push(c),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.field {
            FormField::Name => {
                self.name.pop();
            }
            FormField::Duration => {
                self.duration.pop();
            }
            FormField::Color => {}
        }
    }

    /// Step through the colour swatches; a colour not in the palette starts from the first swatch
    pub fn cycle_color(&mut self, forward: bool) {
        let len = TASK_COLORS.len();
        let next = match TASK_COLORS
            .iter()
            .position(|c| c.eq_ignore_ascii_case(&self.color))
        {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        self.color = TASK_COLORS[next].to_string();
    }

    /// Validated `(name, minutes)`
    pub fn validate(&self) -> Result<(String, u32), FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::EmptyName);
        }
        match self.duration.trim().parse::<u32>() {
            Ok(minutes) if minutes >= 1 => Ok((name.to_string(), minutes)),
            _ => Err(FormError::InvalidDuration),
        }
    }
}
