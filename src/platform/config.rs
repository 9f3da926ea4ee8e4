// OncoViz - platform/config.rs
//
// Platform-specific configuration, data directory resolution, and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for OncoViz data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/oncoviz/ or %APPDATA%\OncoViz\)
    pub config_dir: PathBuf,

    /// Data directory for the persisted session.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }

    /// Full path of the config file.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[data]` section.
    pub data: DataSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[data]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DataSection {
    /// Incidence CSV loaded at startup when no path is given on the CLI.
    pub file: Option<PathBuf>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Body font size in points.
    pub font_size: Option<f32>,
    /// Start in dark mode.
    pub dark_mode: Option<bool>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: trace, debug, info, warn, or error.
    pub level: Option<String>,
}

/// Validated configuration with defaults applied.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_file: Option<PathBuf>,
    pub font_size: f32,
    pub dark_mode: bool,
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            font_size: constants::DEFAULT_FONT_SIZE,
            dark_mode: true,
            log_level: None,
        }
    }
}

/// Load config.toml from `path`. A missing file yields the defaults;
/// a present-but-invalid file is an error so typos surface at startup
/// instead of being silently ignored.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let raw: RawConfig = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    validate(raw)
}

/// Validate raw config values and apply defaults.
fn validate(raw: RawConfig) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::default();

    let font_size = match raw.ui.font_size {
        Some(size) => {
            if !(constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
                return Err(ConfigError::ValueOutOfRange {
                    field: "ui.font_size".to_string(),
                    value: size.to_string(),
                    expected: format!(
                        "{} to {}",
                        constants::MIN_FONT_SIZE,
                        constants::MAX_FONT_SIZE
                    ),
                });
            }
            size
        }
        None => defaults.font_size,
    };

    if let Some(ref level) = raw.logging.level {
        const VALID: &[&str] = &["trace", "debug", "info", "warn", "error"];
        if !VALID.contains(&level.as_str()) {
            return Err(ConfigError::ValueOutOfRange {
                field: "logging.level".to_string(),
                value: level.clone(),
                expected: "one of: trace, debug, info, warn, error".to_string(),
            });
        }
    }

    Ok(AppConfig {
        data_file: raw.data.file,
        font_size,
        dark_mode: raw.ui.dark_mode.unwrap_or(defaults.dark_mode),
        log_level: raw.logging.level,
    })
}
