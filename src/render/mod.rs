//! Frame orchestration: turns geometry into an ordered draw sequence.
//!
//! Draw order per frame:
//! 1. density scale, clear
//! 2. hour gutter band
//! 3. row line + hour label for every hour `0..=24`
//! 4. header band
//! 5. column line + column header for every visible day
//! 6. publish `current_date = start_date + last visible day`
//!
//! Steps 3 and 5 need a column width; when the geometry reports no visible
//! columns they are skipped and the current date falls back to the anchor.

pub mod painter;
pub mod palette;
pub mod surface;

pub use painter::{DefaultPainter, GridPainter, PaintContext};
pub use palette::{Color, ColorParseError, ColorScheme, Palette};
pub use surface::{DrawCommand, DrawingSurface, Paint, PaintStyle, RecordingSurface, TextAlign};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::model::DayIndex;

/// What one frame produced besides pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSummary {
    /// `start_date + last visible day index` for this frame.
    pub current_date: NaiveDate,
    /// First and last drawn day, or `None` when no column was visible.
    pub visible_days: Option<(DayIndex, DayIndex)>,
}

/// Draw one frame.
///
/// Pure with respect to its inputs: calling it twice with the same context
/// issues the same command sequence and returns the same summary.
pub fn render_frame<P>(
    surface: &mut dyn DrawingSurface,
    painter: &P,
    cx: &PaintContext<'_>,
) -> FrameSummary
where
    P: GridPainter + ?Sized,
{
    let geometry = cx.geometry;

    surface.scale(geometry.viewport().effective_density());
    surface.clear(cx.palette.background);

    painter.draw_hour_gutter(surface, cx);

    if geometry.row_height().is_some() {
        for hour in geometry.visible_hour_indices() {
            painter.draw_row_line(surface, cx, hour);
            painter.draw_hour_label(surface, cx, hour);
        }
    }

    painter.draw_header(surface, cx);

    let range = geometry.visible_day_range();
    if let Some(range) = range {
        for day in range.indices() {
            // Days past chrono's calendar range have no label to draw.
            let Some(date) = day.date_from(cx.start_date) else {
                continue;
            };
            painter.draw_column_line(surface, cx, day);
            painter.draw_column_header(surface, cx, day, date);
        }
    }

    let summary = FrameSummary {
        current_date: geometry.end_date(cx.start_date),
        visible_days: range.map(|r| (r.first, r.last)),
    };
    trace!(
        current_date = %summary.current_date,
        visible_days = ?summary.visible_days,
        "frame rendered"
    );
    summary
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
