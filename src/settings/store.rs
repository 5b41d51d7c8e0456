use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{from_str, to_string_pretty};
use std::{fs, path::PathBuf};

use crate::settings::{consts::SETTINGS_FILE, paths::project_dirs};

#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
pub struct Settings {
    #[serde(rename = "login")]
    pub login: Option<String>,
    #[serde(rename = "password")]
    pub password: Option<String>,
    #[serde(rename = "persistSession", default)]
    pub persist_session: bool,
}

pub trait SettingsStore {
    fn load(&self) -> Result<Settings>;
    fn save(&self, settings: &Settings) -> Result<()>;
}

pub struct FileSettingsStore {
    directory: PathBuf, // platform config directory (from ProjectDirs)
    file: &'static str, // "settings.json"
}

impl FileSettingsStore {
    /// Build from ProjectDirs config directory:
    ///   - Windows:   %APPDATA%\<org>\<app>\config\settings.json
    ///   - macOS:     ~/Library/Application Support/<qualifier>.<org>.<app>/settings.json
    ///   - Linux:     ~/.config/<app>/settings.json
    pub fn new() -> Result<Self> {
        Ok(Self {
            directory: project_dirs()?.config_dir().to_path_buf(),
            file: SETTINGS_FILE,
        })
    }

    fn path(&self) -> PathBuf {
        self.directory.join(self.file)
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<Settings> {
        fs::create_dir_all(&self.directory).with_context(|| {
            format!(
                "Failed to create settings directory: {}",
                self.directory.display()
            )
        })?;
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => {
                let defaults = Settings::default();
                self.save(&defaults)?;
                return Ok(defaults);
            }
        };
        from_str(&content).context("Failed to deserialize settings")
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        fs::create_dir_all(&self.directory).with_context(|| {
            format!(
                "Failed to create settings directory: {}",
                self.directory.display()
            )
        })?;
        fs::write(self.path(), to_string_pretty(settings)?)
            .with_context(|| format!("Failed to persist settings file: {}", self.path().display()))
    }
}

/// Settings read from an explicit `--credentials` file.
pub struct JsonFileSettingsStore {
    path: PathBuf,
}

impl JsonFileSettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SettingsStore for JsonFileSettingsStore {
    fn load(&self) -> Result<Settings> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings file: {}", self.path.display()))?;
        from_str(&content).context("Failed to deserialize settings")
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        fs::write(&self.path, to_string_pretty(settings)?)
            .with_context(|| format!("Failed to persist settings file: {}", self.path.display()))
    }
}
