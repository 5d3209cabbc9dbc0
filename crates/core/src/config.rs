//! On-disk alias store.
//!
//! The store is a TOML file holding a single `[aliases]` table:
//!
//! ```toml
//! [aliases]
//! buddies = ["schustafa", "stephanieg0"]
//! kiran = ["krhkt"]
//! ```
//!
//! By default it lives at `$XDG_CONFIG_HOME/pairing-with/config.toml`, or
//! `~/.config/pairing-with/config.toml` when `XDG_CONFIG_HOME` is unset.
//! Writes are a plain read-modify-write with no locking.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::alias::AliasBook;
use crate::errors::ConfigError;

/// Directory created under the config home.
pub const CONFIG_DIR_NAME: &str = "pairing-with";

/// File name of the alias store.
pub const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_XDG_CONFIG_DIRNAME: &str = ".config";

/// Serialized shape of the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFileData {
    #[serde(default)]
    aliases: AliasBook,
}

/// Handle on the alias store file.
#[derive(Debug, Clone)]
pub struct AliasStore {
    path: PathBuf,
}

impl AliasStore {
    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform default location.
    pub fn default_location() -> Result<Self, ConfigError> {
        let path = default_config_path(std::env::var_os("XDG_CONFIG_HOME"), dirs::home_dir())?;
        Ok(Self::at(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the alias book, creating an empty store first if none exists.
    pub fn load(&self) -> Result<AliasBook, ConfigError> {
        self.create_if_missing()?;

        info!(path = %self.path.display(), "loading alias store");
        let contents = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let data: ConfigFileData =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: self.path.clone(),
                detail: e.to_string(),
            })?;

        debug!(count = data.aliases.len(), "loaded aliases");
        Ok(data.aliases)
    }

    /// Write the alias book back to disk, replacing the file.
    pub fn save(&self, book: &AliasBook) -> Result<(), ConfigError> {
        info!(path = %self.path.display(), "saving alias store");
        self.ensure_parent_dir()?;
        std::fs::write(&self.path, render(book)?).map_err(|e| self.io_error(e))?;
        debug!(count = book.len(), "saved aliases");
        Ok(())
    }

    fn create_if_missing(&self) -> Result<(), ConfigError> {
        if self.path.exists() {
            return Ok(());
        }

        self.ensure_parent_dir()?;
        std::fs::write(&self.path, render(&AliasBook::new())?).map_err(|e| self.io_error(e))?;
        info!(path = %self.path.display(), "created empty alias store");
        Ok(())
    }

    fn ensure_parent_dir(&self) -> Result<(), ConfigError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
                std::fs::create_dir_all(dir).map_err(|source| ConfigError::IoError {
                    path: dir.to_path_buf(),
                    source,
                })?;
                debug!(dir = %dir.display(), "created config directory");
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn io_error(&self, source: std::io::Error) -> ConfigError {
        ConfigError::IoError {
            path: self.path.clone(),
            source,
        }
    }
}

fn render(book: &AliasBook) -> Result<String, ConfigError> {
    let data = ConfigFileData {
        aliases: book.clone(),
    };
    toml::to_string_pretty(&data).map_err(|e| ConfigError::SerializeError(e.to_string()))
}

/// Resolve the store path from `$XDG_CONFIG_HOME` and the home directory.
pub fn default_config_path(
    xdg_config_home: Option<OsString>,
    home_dir: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    let config_home = match xdg_config_home.filter(|v| !v.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => home_dir
            .ok_or(ConfigError::PathUnavailable)?
            .join(DEFAULT_XDG_CONFIG_DIRNAME),
    };
    Ok(config_home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
