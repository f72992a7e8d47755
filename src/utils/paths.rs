use dirs::home_dir;
use std::{env, path::PathBuf};

use crate::config::Config;

pub const HOME_ENV: &str = "OTORI_HOME";
pub const PROFILES_DIR_ENV: &str = "OTORI_PROFILES_DIR";

const DEFAULT_DIR_NAME: &str = ".otori";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const DEFAULT_PROFILES_DIR: &str = "profiles";

/// Returns the application data directory, defaulting to `~/.otori`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn config_dir_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_DIR)
}

pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    config_dir_in(base).join(CONFIG_FILE)
}

/// Profiles root: `OTORI_PROFILES_DIR`, then the configured directory, then
/// `./profiles` relative to the working directory.
pub fn profiles_root(config: &Config) -> PathBuf {
    if let Some(custom) = env::var_os(PROFILES_DIR_ENV).filter(|value| !value.is_empty()) {
        return PathBuf::from(custom);
    }
    resolve_profiles_root(None, config)
}

pub fn resolve_profiles_root(env_override: Option<PathBuf>, config: &Config) -> PathBuf {
    env_override
        .or_else(|| config.profiles_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PROFILES_DIR))
}
