//! Configuration loading and root folder resolution

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// File name of the shared SQLite database inside the root folder.
pub const DATABASE_FILE: &str = "tangshi.db";

/// Environment variable consulted when no root folder is given on the
/// command line.
pub const ROOT_FOLDER_ENV: &str = "TANGSHI_ROOT_FOLDER";

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. `TANGSHI_ROOT_FOLDER` environment variable
/// 3. TOML config file (`root_folder` key)
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&Path>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = locate_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(root_folder);
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Path of the shared database inside a resolved root folder.
pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join(DATABASE_FILE)
}

/// Locate the configuration file for the platform.
fn locate_config_file() -> Result<PathBuf> {
    let candidate = dirs::config_dir()
        .map(|d| d.join("tangshi").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if candidate.exists() {
        Ok(candidate)
    } else {
        Err(Error::Config(format!(
            "Config file not found: {}",
            candidate.display()
        )))
    }
}

/// OS-dependent default root folder path.
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("tangshi"))
        .unwrap_or_else(|| PathBuf::from("./tangshi_data"))
}
