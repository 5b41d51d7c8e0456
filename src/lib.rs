use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, warn};

pub mod cli;
pub mod commands;
pub mod services;
pub mod settings;

use cli::{Cli, Commands};
use settings::{FileSettingsStore, JsonFileSettingsStore, SettingsStore};

pub struct AppCtx {
    pub settings_store: Box<dyn SettingsStore>,
    /// Where saved sessions live, `None` to fall back to the working directory.
    pub session_dir: Option<PathBuf>,
}

pub async fn run(cli: Cli) -> Result<()> {
    debug!(
        "Beeline CLI version {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION")
    );

    let settings_store: Box<dyn SettingsStore> = match cli.credentials {
        Some(path) => Box::new(JsonFileSettingsStore::new(path.into())),
        None => Box::new(FileSettingsStore::new()?),
    };
    let session_dir = match settings::session_dir() {
        Ok(directory) => Some(directory),
        Err(e) => {
            warn!("{:#}", e);
            None
        }
    };
    let ctx = AppCtx {
        settings_store,
        session_dir,
    };

    match cli.command {
        Commands::Config(args) => commands::config::handle(args, &ctx).await,
        Commands::Status(args) => commands::status::handle(args, &ctx).await,
    }
}
