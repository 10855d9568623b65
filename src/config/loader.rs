use std::path::{Path, PathBuf};

use crate::args::DEFAULT_CONFIG_FILES;
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Loads `explicit` when given, otherwise the first default config file
/// present in the working directory.
///
/// # Errors
///
/// Returns an error when the chosen file cannot be read or parsed.
pub fn load_config(explicit: Option<&str>) -> AppResult<Option<ConfigFile>> {
    let path = match explicit {
        Some(path) => PathBuf::from(path),
        None => match find_default_config(Path::new(".")) {
            Some(path) => path,
            None => return Ok(None),
        },
    };
    tracing::debug!("Using config file {}", path.display());
    load_config_file(&path).map(Some)
}

/// First of the default config names that exists in `dir`.
pub(crate) fn find_default_config(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let extension = path.extension().and_then(|ext| ext.to_str());
    let parse: fn(&Path, &str) -> AppResult<ConfigFile> = match extension {
        Some("toml") => parse_toml,
        Some("json") => parse_json,
        Some(ext) => {
            return Err(AppError::config(ConfigError::UnsupportedExtension {
                ext: ext.to_owned(),
            }));
        }
        None => return Err(AppError::config(ConfigError::MissingExtension)),
    };
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    parse(path, &content)
}

fn parse_toml(path: &Path, content: &str) -> AppResult<ConfigFile> {
    toml::from_str(content).map_err(|err| {
        AppError::config(ConfigError::ParseToml {
            path: path.to_path_buf(),
            source: err,
        })
    })
}

fn parse_json(path: &Path, content: &str) -> AppResult<ConfigFile> {
    serde_json::from_str(content).map_err(|err| {
        AppError::config(ConfigError::ParseJson {
            path: path.to_path_buf(),
            source: err,
        })
    })
}
