mod consts;
mod logging;
mod paths;
mod store;

pub use logging::init_logger;
pub use paths::{data_dir, session_dir};
pub use store::{FileSettingsStore, JsonFileSettingsStore, Settings, SettingsStore};
