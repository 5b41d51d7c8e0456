use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use std::{fs, path::PathBuf};

use crate::settings::consts::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, SESSIONS_DIR};

pub(super) fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
        .ok_or_else(|| anyhow!("Could not determine project directories"))
}

fn ensure_dir(directory: PathBuf) -> Result<PathBuf> {
    fs::create_dir_all(&directory)
        .with_context(|| format!("Failed to create directory: {}", directory.display()))?;
    Ok(directory)
}

/// Platform data directory, holding the log file and `sessions/`.
pub fn data_dir() -> Result<PathBuf> {
    ensure_dir(project_dirs()?.data_dir().to_path_buf())
}

/// Directory holding the saved portal sessions, created on demand.
pub fn session_dir() -> Result<PathBuf> {
    ensure_dir(data_dir()?.join(SESSIONS_DIR))
}
