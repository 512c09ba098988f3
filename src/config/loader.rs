use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::TrendConfig;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".incident-trends.toml";

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> std::result::Result<TrendConfig, String> {
    let config = toml::from_str::<TrendConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;
    config.validate()?;
    Ok(config)
}

/// Load an explicitly requested config file; any failure is fatal.
pub fn load_config_from(path: &Path) -> Result<TrendConfig> {
    let contents = read_config_file(path).map_err(|e| {
        Error::Configuration(format!("cannot read {}: {}", path.display(), e))
    })?;
    let config = parse_and_validate_config(&contents).map_err(Error::Configuration)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try the implicit config file; parse problems fall back to defaults with a warning.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<TrendConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Config from `explicit` when given, else from the working directory, else defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<TrendConfig> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return Ok(TrendConfig::default());
        }
    };

    Ok(load_config_in(&current))
}

pub(crate) fn load_config_in(dir: &Path) -> TrendConfig {
    let path: PathBuf = dir.join(CONFIG_FILE_NAME);
    try_load_config_from_path(&path).unwrap_or_else(|| {
        log::debug!("No config at {}. Using default config.", path.display());
        TrendConfig::default()
    })
}
