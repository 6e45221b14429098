//! Tests for configuration file loading.

use super::*;
use crate::render::Color;
use serial_test::serial;
use std::env;
use std::fs;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn default_config_path_contains_calgrid_config_toml() {
    let Some(path) = default_config_path() else {
        return;
    };
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("calgrid") && path_str.ends_with("config.toml"),
        "Path should contain 'calgrid' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("calgrid_test_config_valid.toml");

    let toml_content = r##"
start_date = "2024-01-15"
column_count = 7
virtual_height = 2400.0
pixel_density = 2.0
locale = "en"

[colors]
header = "#336699"
today = "#40ffffff"
"##;

    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.start_date, Some(date(2024, 1, 15)));
    assert_eq!(config.column_count, Some(7));
    assert_eq!(config.virtual_height, Some(2400.0));
    assert_eq!(config.pixel_density, Some(2.0));
    assert_eq!(config.locale, Some(Locale::English));
    assert_eq!(config.hour_gutter_width, None);

    let colors = config.colors.expect("colors table");
    assert_eq!(colors.header, Some(Color::rgb(0x33, 0x66, 0x99)));
    assert_eq!(colors.today, Some(Color::argb(0x40, 0xff, 0xff, 0xff)));
    assert_eq!(colors.line, None);

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("calgrid_test_config_invalid.toml");
    fs::write(&config_path, "column_count = [not toml").expect("Failed to write test config");

    let result = load_config_file(&config_path);
    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Invalid TOML should be a parse error, got {result:?}"
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn bad_color_is_a_parse_error() {
    let config_path = env::temp_dir().join("calgrid_test_config_bad_color.toml");
    fs::write(&config_path, "[colors]\nheader = \"#12\"\n").expect("Failed to write test config");

    let result = load_config_file(&config_path);
    match result {
        Err(ConfigError::ParseError { reason, .. }) => {
            assert!(reason.contains("hex digits"), "reason: {reason}");
        }
        other => panic!("expected parse error, got {other:?}"),
    }

    fs::remove_file(config_path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("theme = \"dark\"\n");
    assert!(result.is_err(), "Unknown top-level keys should be rejected");

    let result: Result<ConfigFile, _> = toml::from_str("[colors]\nborder = \"#000000\"\n");
    assert!(result.is_err(), "Unknown color keys should be rejected");
}

#[test]
fn locale_accepts_long_names() {
    let config: ConfigFile = toml::from_str("locale = \"korean\"\n").unwrap();
    assert_eq!(config.locale, Some(Locale::Korean));
}

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_overrides_with_config_file_values() {
    let config_file = ConfigFile {
        start_date: Some(date(2024, 3, 1)),
        hour_gutter_width: Some(40.0),
        column_count: Some(3),
        locale: Some(Locale::English),
        colors: Some(ColorsSection {
            line: Some(Color::rgb(1, 2, 3)),
            ..ColorsSection::default()
        }),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(config_file));
    let defaults = ResolvedConfig::default();

    assert_eq!(resolved.start_date, Some(date(2024, 3, 1)));
    assert_eq!(resolved.layout.hour_gutter_width, 40.0);
    assert_eq!(resolved.layout.column_count, 3);
    assert_eq!(resolved.layout.header_height, defaults.layout.header_height);
    assert_eq!(resolved.layout.virtual_height, defaults.layout.virtual_height);
    assert_eq!(resolved.locale, Locale::English);
    assert_eq!(resolved.colors.line, Color::rgb(1, 2, 3));
    assert_eq!(resolved.colors.header, defaults.colors.header);
}

/// RAII guard to ensure environment variable cleanup even under test parallelism.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

#[test]
#[serial(calgrid_env)]
fn apply_env_overrides_reads_start_date_and_locale() {
    let _date = EnvGuard::new(START_DATE_ENV);
    let _locale = EnvGuard::new(LOCALE_ENV);

    env::set_var(START_DATE_ENV, "2025-06-01");
    env::set_var(LOCALE_ENV, "en");

    let result = apply_env_overrides(ResolvedConfig::default()).expect("valid overrides");
    assert_eq!(result.start_date, Some(date(2025, 6, 1)));
    assert_eq!(result.locale, Locale::English);
}

#[test]
#[serial(calgrid_env)]
fn apply_env_overrides_rejects_bad_date() {
    let _date = EnvGuard::new(START_DATE_ENV);
    let _locale = EnvGuard::new(LOCALE_ENV);

    env::set_var(START_DATE_ENV, "next tuesday");

    let result = apply_env_overrides(ResolvedConfig::default());
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvValue { var: START_DATE_ENV, .. })
    ));
}

#[test]
#[serial(calgrid_env)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    let _date = EnvGuard::new(START_DATE_ENV);
    let _locale = EnvGuard::new(LOCALE_ENV);

    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), Ok(base));
}

#[test]
fn apply_cli_overrides_wins_over_everything() {
    let base = ResolvedConfig {
        start_date: Some(date(2024, 1, 1)),
        locale: Locale::English,
        ..ResolvedConfig::default()
    };

    let result = apply_cli_overrides(base, Some(date(2024, 2, 2)), Some(7), Some(Locale::Korean));
    assert_eq!(result.start_date, Some(date(2024, 2, 2)));
    assert_eq!(result.layout.column_count, 7);
    assert_eq!(result.locale, Locale::Korean);
}

#[test]
fn apply_cli_overrides_keeps_unset_fields() {
    let base = ResolvedConfig {
        start_date: Some(date(2024, 1, 1)),
        ..ResolvedConfig::default()
    };
    assert_eq!(apply_cli_overrides(base.clone(), None, None, None), base);
}

#[test]
#[serial(calgrid_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_PATH_ENV);

    let explicit = env::temp_dir().join("calgrid_test_explicit.toml");
    let from_env = env::temp_dir().join("calgrid_test_from_env.toml");
    fs::write(&explicit, "column_count = 2\n").unwrap();
    fs::write(&from_env, "column_count = 9\n").unwrap();
    env::set_var(CONFIG_PATH_ENV, &from_env);

    let config = load_config_with_precedence(Some(explicit.clone()))
        .unwrap()
        .unwrap();
    assert_eq!(config.column_count, Some(2));

    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();
}

#[test]
#[serial(calgrid_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_PATH_ENV);

    let from_env = env::temp_dir().join("calgrid_test_env_only.toml");
    fs::write(&from_env, "column_count = 9\n").unwrap();
    env::set_var(CONFIG_PATH_ENV, &from_env);

    let config = load_config_with_precedence(None).unwrap().unwrap();
    assert_eq!(config.column_count, Some(9));

    fs::remove_file(from_env).ok();
}

#[test]
#[serial(calgrid_config)]
fn load_config_with_precedence_rejects_empty_env_path() {
    let _guard = EnvGuard::new(CONFIG_PATH_ENV);
    env::set_var(CONFIG_PATH_ENV, "");

    assert!(matches!(
        load_config_with_precedence(None),
        Err(ConfigError::InvalidPath(_))
    ));
}
