//! Calendar grid - Entry Point

use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use calgrid::model::{AppError, Locale};

/// Calendar grid - a scrollable day-by-hour grid in the terminal
#[derive(Parser, Debug)]
#[command(name = "calgrid")]
#[command(version)]
#[command(about = "Scrollable day-by-hour calendar grid for the terminal")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Anchor date shown as "today" (YYYY-MM-DD); defaults to the local date
    #[arg(short = 'd', long)]
    pub start_date: Option<NaiveDate>,

    /// Number of day columns visible at once
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub columns: Option<u32>,

    /// Weekday name language
    #[arg(long, value_parser = ["ko", "en"])]
    pub locale: Option<String>,

    /// Print one rendered frame as JSON and exit instead of starting the UI
    #[arg(long)]
    pub dump_frame: bool,

    /// Viewport width for --dump-frame, in device-independent units
    #[arg(long, default_value_t = 500.0, requires = "dump_frame")]
    pub width: f32,

    /// Viewport height for --dump-frame, in device-independent units
    #[arg(long, default_value_t = 800.0, requires = "dump_frame")]
    pub height: f32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let locale = args.locale.as_deref().map(str::parse::<Locale>).transpose()?;

    // Defaults → Config File → Env Vars → CLI Args
    let config =
        calgrid::integration::resolve_config(args.config.clone(), args.start_date, args.columns, locale)?;

    // The widget tolerates degenerate layouts; the binary does not.
    config.layout.validate().map_err(AppError::from)?;

    let today = Local::now().date_naive();

    if args.dump_frame {
        let json = calgrid::integration::dump_frame(&config, today, args.width, args.height)?;
        println!("{json}");
        return Ok(());
    }

    calgrid::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let grid = calgrid::integration::build_grid(&config, today);
    calgrid::view::run(grid)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["calgrid", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["calgrid", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["calgrid"]);
        assert_eq!(args.config, None);
        assert_eq!(args.start_date, None);
        assert_eq!(args.columns, None);
        assert_eq!(args.locale, None);
        assert!(!args.dump_frame);
        assert_eq!(args.width, 500.0);
        assert_eq!(args.height, 800.0);
    }

    #[test]
    fn test_start_date_parses_iso_date() {
        let args = Args::parse_from(["calgrid", "--start-date", "2024-01-15"]);
        assert_eq!(args.start_date, NaiveDate::from_ymd_opt(2024, 1, 15));
    }

    #[test]
    fn test_start_date_short_flag() {
        let args = Args::parse_from(["calgrid", "-d", "2024-02-29"]);
        assert_eq!(args.start_date, NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_start_date_rejects_garbage() {
        let result = Args::try_parse_from(["calgrid", "--start-date", "2024-02-30"]);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ValueValidation
        );
    }

    #[test]
    fn test_columns_rejects_zero() {
        let result = Args::try_parse_from(["calgrid", "-c", "0"]);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ValueValidation
        );
    }

    #[test]
    fn test_columns_long_flag() {
        let args = Args::parse_from(["calgrid", "--columns", "7"]);
        assert_eq!(args.columns, Some(7));
    }

    #[test]
    fn test_locale_accepts_known_values() {
        let args = Args::parse_from(["calgrid", "--locale", "en"]);
        assert_eq!(args.locale.as_deref(), Some("en"));
    }

    #[test]
    fn test_locale_invalid_rejects() {
        let result = Args::try_parse_from(["calgrid", "--locale", "fr"]);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::InvalidValue
        );
    }

    #[test]
    fn test_size_requires_dump_frame() {
        let result = Args::try_parse_from(["calgrid", "--width", "300"]);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_combined_flags() {
        let args = Args::parse_from([
            "calgrid",
            "--config",
            "/custom/config.toml",
            "-d",
            "2024-01-15",
            "-c",
            "3",
            "--dump-frame",
            "--width",
            "320",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(args.columns, Some(3));
        assert!(args.dump_frame);
        assert_eq!(args.width, 320.0);
    }

    #[test]
    fn test_start_date_flows_through_config_precedence_chain() {
        use calgrid::config::{apply_cli_overrides, merge_config, ConfigFile};

        let config_file = ConfigFile {
            start_date: NaiveDate::from_ymd_opt(2023, 6, 1),
            column_count: Some(4),
            ..ConfigFile::default()
        };

        let merged = merge_config(Some(config_file));
        assert_eq!(merged.start_date, NaiveDate::from_ymd_opt(2023, 6, 1));

        let with_cli = apply_cli_overrides(merged, NaiveDate::from_ymd_opt(2024, 1, 15), None, None);
        assert_eq!(with_cli.start_date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(with_cli.layout.column_count, 4);
    }
}
