//! Configuration file loading with precedence handling.

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::model::{LayoutConstants, Locale};
use crate::render::{Color, ColorScheme};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "CALGRID_CONFIG";

/// Environment variable overriding the anchor date (`YYYY-MM-DD`).
pub const START_DATE_ENV: &str = "CALGRID_START_DATE";

/// Environment variable overriding the day-name locale (`ko` or `en`).
pub const LOCALE_ENV: &str = "CALGRID_LOCALE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or an invalid value.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// An environment override could not be parsed.
    #[error("Invalid value '{value}' in {var}: {reason}")]
    InvalidEnvValue {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/calgrid/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Anchor date, `YYYY-MM-DD`. Today when absent.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// Width of the hour gutter.
    #[serde(default)]
    pub hour_gutter_width: Option<f32>,

    /// Height of the day header band.
    #[serde(default)]
    pub header_height: Option<f32>,

    /// Day columns visible at once.
    #[serde(default)]
    pub column_count: Option<u32>,

    /// Height of the scrollable surface.
    #[serde(default)]
    pub virtual_height: Option<f32>,

    /// Physical pixels per device-independent unit.
    #[serde(default)]
    pub pixel_density: Option<f32>,

    /// Day-name locale (`"ko"` or `"en"`).
    #[serde(default)]
    pub locale: Option<Locale>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Color overrides.
    #[serde(default)]
    pub colors: Option<ColorsSection>,
}

/// `[colors]` table.
///
/// Values are `#rrggbb` or `#aarrggbb` (alpha first):
/// ```toml
/// [colors]
/// header = "#ff7962"
/// today = "#60ffffff"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ColorsSection {
    /// Grid lines.
    #[serde(default)]
    pub line: Option<Color>,
    /// Hour gutter band.
    #[serde(default)]
    pub gutter: Option<Color>,
    /// Hour labels.
    #[serde(default)]
    pub hour_text: Option<Color>,
    /// Header band.
    #[serde(default)]
    pub header: Option<Color>,
    /// Day labels.
    #[serde(default)]
    pub header_text: Option<Color>,
    /// Today pill.
    #[serde(default)]
    pub today: Option<Color>,
}

impl ColorsSection {
    /// Overlay the colors that are set onto `base`.
    pub fn apply_to(&self, base: ColorScheme) -> ColorScheme {
        ColorScheme {
            background: base.background,
            line: self.line.unwrap_or(base.line),
            gutter: self.gutter.unwrap_or(base.gutter),
            hour_text: self.hour_text.unwrap_or(base.hour_text),
            header: self.header.unwrap_or(base.header),
            header_text: self.header_text.unwrap_or(base.header_text),
            today: self.today.unwrap_or(base.today),
        }
    }
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Anchor date; `None` means today.
    pub start_date: Option<NaiveDate>,
    /// Layout constants.
    pub layout: LayoutConstants,
    /// Pixel density handed to the widget.
    pub pixel_density: f32,
    /// Day-name locale.
    pub locale: Locale,
    /// Colors.
    pub colors: ColorScheme,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            start_date: None,
            layout: LayoutConstants::default(),
            pixel_density: 1.0,
            locale: Locale::default(),
            colors: ColorScheme::default(),
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/calgrid/calgrid.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("calgrid").join("calgrid.log")
    } else {
        PathBuf::from("calgrid.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors. Invalid colors
/// and dates are parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/calgrid/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("calgrid").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `CALGRID_CONFIG` environment variable
/// 3. Default path `~/.config/calgrid/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Some(env_path) = std::env::var_os(CONFIG_PATH_ENV) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_PATH_ENV} is empty")));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let layout = LayoutConstants {
        hour_gutter_width: config
            .hour_gutter_width
            .unwrap_or(defaults.layout.hour_gutter_width),
        header_height: config.header_height.unwrap_or(defaults.layout.header_height),
        column_count: config.column_count.unwrap_or(defaults.layout.column_count),
        virtual_height: config
            .virtual_height
            .unwrap_or(defaults.layout.virtual_height),
    };

    ResolvedConfig {
        start_date: config.start_date.or(defaults.start_date),
        layout,
        pixel_density: config.pixel_density.unwrap_or(defaults.pixel_density),
        locale: config.locale.unwrap_or(defaults.locale),
        colors: config
            .colors
            .map(|colors| colors.apply_to(defaults.colors))
            .unwrap_or(defaults.colors),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `CALGRID_START_DATE`: anchor date, `YYYY-MM-DD`
/// - `CALGRID_LOCALE`: `ko` or `en`
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvValue`] when a set variable cannot be parsed.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(value) = std::env::var(START_DATE_ENV) {
        let date = value
            .parse::<NaiveDate>()
            .map_err(|e| ConfigError::InvalidEnvValue {
                var: START_DATE_ENV,
                value: value.clone(),
                reason: e.to_string(),
            })?;
        config.start_date = Some(date);
    }

    if let Ok(value) = std::env::var(LOCALE_ENV) {
        let locale = value
            .parse::<Locale>()
            .map_err(|e| ConfigError::InvalidEnvValue {
                var: LOCALE_ENV,
                value: value.clone(),
                reason: e.to_string(),
            })?;
        config.locale = locale;
    }

    Ok(config)
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    start_date_override: Option<NaiveDate>,
    columns_override: Option<u32>,
    locale_override: Option<Locale>,
) -> ResolvedConfig {
    if let Some(start_date) = start_date_override {
        config.start_date = Some(start_date);
    }

    if let Some(columns) = columns_override {
        config.layout.column_count = columns;
    }

    if let Some(locale) = locale_override {
        config.locale = locale;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
