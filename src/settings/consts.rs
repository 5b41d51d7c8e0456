use tracing_subscriber::filter::LevelFilter;

pub const APP_QUALIFIER: &str = "ru";
pub const APP_ORGANIZATION: &str = "beeline";
pub const APP_NAME: &str = "beeline-cli";

pub const SETTINGS_FILE: &str = "settings.json";
pub const LOG_FILE: &str = "beeline.log";
pub const SESSIONS_DIR: &str = "sessions";

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const FILE_LOG_LEVEL: LevelFilter = LevelFilter::DEBUG;
