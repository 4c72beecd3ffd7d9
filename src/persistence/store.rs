use super::files::{atomic_write, read_file, settings_file, tasks_file};
use super::settings::{load_settings, save_settings, Settings};
use crate::domain::Task;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Where tasks and settings live between runs
pub trait Store {
    /// Saved tasks in order. Missing or corrupt data yields an empty list.
    fn load_tasks(&self) -> Vec<Task>;

    fn save_tasks(&self, tasks: &[Task]) -> Result<()>;

    fn load_settings(&self) -> Settings;

    fn save_settings(&self, settings: &Settings) -> Result<()>;
}

/// JSON files in a data directory
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Parse the tasks.json array
pub fn parse_tasks(content: &str) -> Result<Vec<Task>> {
    let mut tasks: Vec<Task> = serde_json::from_str(content).context("Invalid tasks file")?;
    for task in &mut tasks {
        task.duration_minutes = task.duration_minutes.max(1);
    }
    Ok(tasks)
}

impl Store for JsonStore {
    fn load_tasks(&self) -> Vec<Task> {
        let path = tasks_file(&self.dir);
        let content = match read_file(&path) {
            Ok(Some(content)) => content,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read tasks");
                return Vec::new();
            }
        };

        parse_tasks(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt tasks file");
            Vec::new()
        })
    }

    fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string_pretty(tasks)?;
        atomic_write(tasks_file(&self.dir), &json)?;
        tracing::debug!(count = tasks.len(), "saved tasks");
        Ok(())
    }

    fn load_settings(&self) -> Settings {
        load_settings(settings_file(&self.dir))
    }

    fn save_settings(&self, settings: &Settings) -> Result<()> {
        save_settings(settings_file(&self.dir), settings)
    }
}
