//! Pure core integration functions.
//!
//! Glue between resolved configuration and the widget, kept free of
//! terminal I/O so the binary's startup path is testable.

use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

use crate::config::{self, ConfigError, ResolvedConfig};
use crate::model::{AppError, Locale, ViewportState};
use crate::render::{DrawCommand, FrameSummary, Palette, RecordingSurface};
use crate::widget::CalendarGrid;

/// Resolve configuration through the full precedence chain:
/// defaults → config file → environment → CLI flags.
///
/// # Errors
///
/// Fails when a config file exists but is unreadable or invalid, or when an
/// environment override cannot be parsed.
pub fn resolve_config(
    config_path: Option<PathBuf>,
    start_date: Option<NaiveDate>,
    columns: Option<u32>,
    locale: Option<Locale>,
) -> Result<ResolvedConfig, ConfigError> {
    let config_file = config::load_config_with_precedence(config_path)?;
    let merged = config::merge_config(config_file);
    let with_env = config::apply_env_overrides(merged)?;
    Ok(config::apply_cli_overrides(
        with_env, start_date, columns, locale,
    ))
}

/// Build a widget from resolved configuration.
///
/// `today` anchors the grid when the configuration names no start date.
/// Degenerate layouts and densities are logged and passed through; the
/// widget tolerates them.
pub fn build_grid(config: &ResolvedConfig, today: NaiveDate) -> CalendarGrid {
    if let Err(err) = config.layout.validate() {
        warn!(error = %err, "degenerate layout; grid will draw without day columns");
    }
    if let Err(err) = ViewportState::check_density(config.pixel_density) {
        warn!(error = %err, "falling back to a pixel density of 1");
    }

    let start_date = config.start_date.unwrap_or(today);
    let mut grid = CalendarGrid::new(start_date, config.layout)
        .with_palette(Palette::load(&config.colors))
        .with_day_names(config.locale);
    grid.set_pixel_density(config.pixel_density);
    grid
}

/// One rendered frame in serializable form.
#[derive(Debug, Clone, Serialize)]
pub struct FrameDump {
    /// Viewport the frame was drawn for.
    pub viewport: ViewportState,
    /// Dates covered by the frame.
    pub summary: FrameSummary,
    /// Month label of the current date.
    pub month_label: String,
    /// Draw calls in order.
    pub commands: Vec<DrawCommand>,
}

/// Render a single frame at the given size without a terminal.
pub fn render_dump(config: &ResolvedConfig, today: NaiveDate, width: f32, height: f32) -> FrameDump {
    let mut grid = build_grid(config, today);
    grid.on_resize(width, height);

    let mut surface = RecordingSurface::new();
    let summary = grid.on_repaint_requested(&mut surface);

    FrameDump {
        viewport: grid.viewport(),
        summary,
        month_label: grid.month_label(),
        commands: surface.take_commands(),
    }
}

/// [`render_dump`] as pretty-printed JSON.
///
/// # Errors
///
/// Fails only if serialization fails.
pub fn dump_frame(
    config: &ResolvedConfig,
    today: NaiveDate,
    width: f32,
    height: f32,
) -> Result<String, AppError> {
    let dump = render_dump(config, today, width, height);
    Ok(serde_json::to_string_pretty(&dump)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Color;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn build_grid_anchors_on_today_without_start_date() {
        let grid = build_grid(&ResolvedConfig::default(), date(2024, 5, 1));
        assert_eq!(grid.start_date(), date(2024, 5, 1));
    }

    #[test]
    fn build_grid_prefers_configured_start_date() {
        let config = ResolvedConfig {
            start_date: Some(date(2024, 1, 15)),
            ..ResolvedConfig::default()
        };
        let grid = build_grid(&config, date(2030, 1, 1));
        assert_eq!(grid.start_date(), date(2024, 1, 15));
    }

    #[test]
    fn build_grid_loads_palette_and_density() {
        let mut config = ResolvedConfig {
            pixel_density: 2.0,
            ..ResolvedConfig::default()
        };
        config.colors.header = Color::rgb(1, 2, 3);

        let grid = build_grid(&config, date(2024, 1, 15));
        assert_eq!(grid.palette().header.color, Color::rgb(1, 2, 3));
        assert_eq!(grid.viewport().pixel_density, 2.0);
    }

    #[test]
    fn render_dump_matches_scenario_a() {
        let config = ResolvedConfig {
            start_date: Some(date(2024, 1, 15)),
            locale: Locale::English,
            ..ResolvedConfig::default()
        };
        let dump = render_dump(&config, date(2000, 1, 1), 500.0, 800.0);

        assert_eq!(dump.summary.current_date, date(2024, 1, 21));
        assert_eq!(dump.month_label, "January 2024");
        assert!(!dump.commands.is_empty());
    }

    #[test]
    fn dump_frame_is_json_with_tagged_commands() {
        let config = ResolvedConfig {
            start_date: Some(date(2024, 1, 15)),
            ..ResolvedConfig::default()
        };
        let json = dump_frame(&config, date(2024, 1, 15), 500.0, 800.0).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["summary"]["current_date"], "2024-01-21");
        assert_eq!(value["commands"][0]["op"], "scale");
        assert_eq!(value["commands"][1]["op"], "clear");
        assert_eq!(value["commands"][1]["color"], "#00000000");
    }
}
