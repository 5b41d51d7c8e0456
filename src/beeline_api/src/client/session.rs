use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use super::cookies::CookieJar;
use crate::types::Login;

/// How a session survives between runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionOptions {
    /// Save cookies after a successful sign in and try them first next time.
    pub persist: bool,
    /// Session file. Defaults to `<login>.session` in the working directory.
    pub cache_path: Option<PathBuf>,
}

impl SessionOptions {
    /// Session file for `login`, `None` when persistence is off.
    pub fn session_path(&self, login: &Login) -> Option<PathBuf> {
        if !self.persist {
            return None;
        }
        Some(
            self.cache_path
                .clone()
                .unwrap_or_else(|| session_file_name(login).into()),
        )
    }
}

pub fn session_file_name(login: &Login) -> String {
    format!("{}.session", login.as_str())
}

/// Read a saved cookie jar. Missing or unreadable files count as no session.
pub fn load_jar(path: &Path) -> Option<CookieJar> {
    if !path.exists() {
        return None;
    }
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Could not read session file {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(jar) => {
            debug!("Loaded session from {}", path.display());
            Some(jar)
        }
        Err(e) => {
            warn!("Ignoring corrupt session file {}: {}", path.display(), e);
            None
        }
    }
}

/// Write the cookie jar, readable and writable by the owner only.
pub fn save_jar(path: &Path, jar: &CookieJar) -> io::Result<()> {
    let json = serde_json::to_string(jar)?;

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    // mode() only applies to new files
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(json.as_bytes())?;
    debug!("Session saved to {}", path.display());
    Ok(())
}
