//! Config file loading and settings resolution.
//!
//! # Storage layout
//!
//! ```text
//! ~/.squadsync/
//!   config.yaml
//! ```
//!
//! ```yaml
//! api:
//!   key: "..."
//!   squad_id: "1234"
//!   base_url: "https://armasquads.com/api/v1"   # optional
//! roster:
//!   file: "blackhorse.hpp"
//! logging:
//!   file: "squadsync.log"                        # optional, stderr when absent
//!   level: "info"                                # optional
//! ```
//!
//! Relative paths in the file resolve against the file's directory.
//! Command-line [`Overrides`] win over file values. [`Settings::resolve`]
//! produces the one immutable value the rest of a run borrows.
//!
//! # API pattern
//!
//! `fn_at(home: &Path, …)` takes an explicit home; the no-arg wrapper derives
//! it from `dirs::home_dir()`. Tests use the `_at` forms.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Production API root of the squad service.
pub const DEFAULT_BASE_URL: &str = "https://armasquads.com/api/v1";

/// Log level used when neither the config file nor `RUST_LOG` sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ---------------------------------------------------------------------------
// File model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSection {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub squad_id: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSection {
    #[serde(default)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSection {
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub level: Option<String>,
}

/// Root of `config.yaml`. Every field is optional at this stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub roster: RosterSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// `<home>/.squadsync/config.yaml` — pure, no I/O.
pub fn default_config_path_at(home: &Path) -> PathBuf {
    home.join(".squadsync").join("config.yaml")
}

/// `default_config_path_at` convenience wrapper.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
    Ok(default_config_path_at(&home))
}

/// Load and parse the config file at `path`.
///
/// Returns `ConfigError::NotFound` if absent and `ConfigError::Parse` (with
/// path and line context) if malformed.
pub fn load_at(path: &Path) -> Result<ConfigFile, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // An empty document deserializes to unit, not a mapping.
    if contents.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    let mut file: ConfigFile =
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if let Some(base) = path.parent() {
        file.roster.file = file.roster.file.map(|p| anchor(base, p));
        file.logging.file = file.logging.file.map(|p| anchor(base, p));
    }
    Ok(file)
}

/// Load `explicit` if given (it must exist), else `default_path` if it
/// exists, else an empty config.
pub fn load_or_default_at(
    explicit: Option<&Path>,
    default_path: Option<&Path>,
) -> Result<ConfigFile, ConfigError> {
    match (explicit, default_path) {
        (Some(path), _) => load_at(path),
        (None, Some(path)) if path.exists() => load_at(path),
        (None, default_path) => {
            if let Some(path) = default_path {
                tracing::debug!(path = %path.display(), "no config file, using command line only");
            }
            Ok(ConfigFile::default())
        }
    }
}

fn anchor(base: &Path, path: PathBuf) -> PathBuf {
    if path.as_os_str().is_empty() || path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Values given on the command line; each one replaces the file's value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub roster: Option<PathBuf>,
    pub api_key: Option<String>,
    pub squad_id: Option<String>,
    pub base_url: Option<String>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Append to this file; `None` means stderr.
    pub file: Option<PathBuf>,
    pub level: String,
}

/// Fully resolved inputs for one reconciliation pass.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: String,
    pub squad_id: String,
    pub base_url: String,
    pub roster_path: PathBuf,
    pub log: LogSettings,
}

impl Settings {
    /// Merge file values and overrides; fail on any missing required value.
    pub fn resolve(file: ConfigFile, overrides: Overrides) -> Result<Self, ConfigError> {
        let api_key = required(overrides.api_key.or(file.api.key), "api.key")?;
        let squad_id = required(overrides.squad_id.or(file.api.squad_id), "api.squad_id")?;
        let roster_path = overrides
            .roster
            .or(file.roster.file)
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ConfigError::Missing("roster.file"))?;

        let base_url = overrides
            .base_url
            .or(file.api.base_url)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let log_file = match overrides.log_file.or(file.logging.file) {
            Some(path) if path.as_os_str().is_empty() => {
                return Err(ConfigError::Empty("logging.file"))
            }
            other => other,
        };
        let level = overrides
            .log_level
            .or(file.logging.level)
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            api_key,
            squad_id,
            base_url,
            roster_path,
            log: LogSettings {
                file: log_file,
                level,
            },
        })
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("squad_id", &self.squad_id)
            .field("base_url", &self.base_url)
            .field("roster_path", &self.roster_path)
            .field("log", &self.log)
            .finish()
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
