//! Config path resolution helpers.

use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "html";

const APP_DIR: &str = "metaimport";
const CONFIG_FILE: &str = "config.toml";

/// `<config dir>/metaimport/config.toml`.
pub fn config_path_in(config_dir: &Path) -> PathBuf {
    config_dir.join(APP_DIR).join(CONFIG_FILE)
}

/// The platform's default config file location, if it has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| config_path_in(&dir))
}

/// `<cache dir>/metaimport`.
pub fn default_state_dir() -> anyhow::Result<PathBuf> {
    let cache_dir = dirs::cache_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine cache directory"))?;
    Ok(cache_dir.join(APP_DIR))
}
