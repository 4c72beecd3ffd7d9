/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    /// Task form modal is open (adding or editing)
    TaskForm,
}

/// Field of the task form that currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Duration,
    Color,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            Self::Name => Self::Duration,
            Self::Duration => Self::Color,
            Self::Color => Self::Name,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Self::Name => Self::Color,
            Self::Duration => Self::Name,
            Self::Color => Self::Duration,
        }
    }
}
