use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Client-local display preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub animations: bool,
    pub sound_effects: bool,
    pub dark_mode: bool,
    pub compact_view: bool,
    pub freeform_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            animations: true,
            sound_effects: true,
            dark_mode: false,
            compact_view: false,
            freeform_mode: false,
        }
    }
}

impl AppSettings {
    /// Returns a copy with the set fields of `update` applied
    pub fn merged(self, update: SettingsUpdate) -> Self {
        Self {
            animations: update.animations.unwrap_or(self.animations),
            sound_effects: update.sound_effects.unwrap_or(self.sound_effects),
            dark_mode: update.dark_mode.unwrap_or(self.dark_mode),
            compact_view: update.compact_view.unwrap_or(self.compact_view),
            freeform_mode: update.freeform_mode.unwrap_or(self.freeform_mode),
        }
    }
}

/// Partial settings change
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub animations: Option<bool>,
    pub sound_effects: Option<bool>,
    pub dark_mode: Option<bool>,
    pub compact_view: Option<bool>,
    pub freeform_mode: Option<bool>,
}

/// Persists [`AppSettings`] under a fixed key inside a directory
pub struct SettingsStore {
    root_path: PathBuf,
}

impl SettingsStore {
    pub const KEY: &'static str = "taskBoardSettings";

    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            root_path: dir.as_ref().to_path_buf(),
        }
    }

    pub fn settings_file(&self) -> PathBuf {
        self.root_path.join(format!("{}.json", Self::KEY))
    }

    /// Loads saved settings, or the defaults when nothing was saved yet
    pub async fn load(&self) -> Result<AppSettings> {
        let file_path = self.settings_file();

        if !file_path.exists() {
            debug!(path = %file_path.display(), "no saved settings, using defaults");
            return Ok(AppSettings::default());
        }

        let contents = fs::read_to_string(&file_path).await?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub async fn save(&self, settings: &AppSettings) -> Result<()> {
        if !self.root_path.exists() {
            fs::create_dir_all(&self.root_path).await?;
        }

        let json = serde_json::to_string_pretty(settings)?;
        fs::write(self.settings_file(), json).await?;
        debug!(path = %self.settings_file().display(), "saved settings");
        Ok(())
    }
}
