use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User preferences stored in settings.json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Start the next task automatically after a 3-2-1 countdown
    #[serde(default)]
    pub autoplay: bool,
    /// Chosen UI language, `None` to detect from the environment
    #[serde(default)]
    pub lang: Option<String>,
}

/// Load settings, falling back to defaults when missing or unreadable
pub fn load_settings<P: AsRef<Path>>(path: P) -> Settings {
    let path = path.as_ref();
    match super::files::read_file(path) {
        Ok(Some(content)) => serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
            Settings::default()
        }),
        Ok(None) => Settings::default(),
        Err(e) => {
            tracing::warn!(error = %e, "could not read settings");
            Settings::default()
        }
    }
}

/// Save settings to settings.json
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    super::files::atomic_write(path, &json)?;
    Ok(())
}
