//! Per-element drawing hooks.
//!
//! The orchestrator decides *what* to draw and in which order; a
//! [`GridPainter`] decides *how* each element looks. Every hook has a default
//! implementation, so a custom painter overrides only the elements it cares
//! about and keeps the rest.

use chrono::{Datelike, NaiveDate};

use super::palette::Palette;
use super::surface::DrawingSurface;
use crate::geometry::Geometry;
use crate::model::{DayIndex, DayNameLookup, HourIndex, Point, Rect};

/// Vertical inset of the today pill inside the header band.
pub const TODAY_PILL_INSET: f32 = 5.0;

/// Everything a hook may read while drawing one frame.
pub struct PaintContext<'a> {
    /// Placement math for this frame.
    pub geometry: &'a Geometry,
    /// Paints loaded for the widget.
    pub palette: &'a Palette,
    /// Weekday naming.
    pub day_names: &'a dyn DayNameLookup,
    /// Anchor date (day index 0).
    pub start_date: NaiveDate,
}

impl PaintContext<'_> {
    /// Full viewport rectangle in screen coordinates.
    pub fn viewport_rect(&self) -> Rect {
        let viewport = self.geometry.viewport();
        Rect::new(0.0, 0.0, viewport.width, viewport.height)
    }

    /// Header band in screen coordinates, right of the gutter.
    pub fn header_clip(&self) -> Rect {
        let layout = self.geometry.layout();
        Rect::new(
            layout.hour_gutter_width,
            0.0,
            self.geometry.viewport().width,
            layout.header_height,
        )
    }

    /// Grid body in screen coordinates: right of the gutter, below the header.
    pub fn body_clip(&self) -> Rect {
        let layout = self.geometry.layout();
        let viewport = self.geometry.viewport();
        Rect::new(
            layout.hour_gutter_width,
            layout.header_height,
            viewport.width,
            viewport.height,
        )
    }
}

/// Label text for a column header: day of month and short weekday name.
pub fn column_label(date: NaiveDate, day_names: &dyn DayNameLookup) -> String {
    format!("{} {}", date.day(), day_names.short_name(date.weekday()))
}

/// Vertical nudge applied to an hour label's baseline so the first and last
/// labels stay inside the grid.
pub fn hour_label_nudge(hour: HourIndex, text_size: f32) -> f32 {
    if hour == HourIndex::FIRST {
        text_size
    } else if hour == HourIndex::LAST {
        -text_size
    } else {
        text_size / 2.0
    }
}

/// Drawing strategy, one method per grid element.
///
/// All coordinates passed to the surface are screen coordinates produced by
/// [`Geometry`]; implementors must not recompute column width.
pub trait GridPainter {
    /// Background band behind the hour labels.
    fn draw_hour_gutter(&self, surface: &mut dyn DrawingSurface, cx: &PaintContext<'_>) {
        let layout = cx.geometry.layout();
        let band = Rect::new(
            0.0,
            layout.header_height,
            layout.hour_gutter_width,
            cx.geometry.viewport().height,
        );
        surface.draw_rect(band, &cx.palette.gutter);
    }

    /// Horizontal line at the top of an hour row.
    fn draw_row_line(&self, surface: &mut dyn DrawingSurface, cx: &PaintContext<'_>, hour: HourIndex) {
        let Some(top) = cx.geometry.hour_top(hour) else {
            return;
        };
        let y = cx.geometry.screen_y(top);
        let layout = cx.geometry.layout();
        surface.draw_line(
            Point::new(layout.hour_gutter_width, y),
            Point::new(cx.geometry.viewport().width, y),
            &cx.palette.line,
        );
    }

    /// Hour number in the gutter.
    fn draw_hour_label(
        &self,
        surface: &mut dyn DrawingSurface,
        cx: &PaintContext<'_>,
        hour: HourIndex,
    ) {
        let Some(top) = cx.geometry.hour_top(hour) else {
            return;
        };
        let paint = &cx.palette.hour_text;
        let at = Point::new(
            cx.geometry.layout().hour_gutter_width / 2.0,
            cx.geometry.screen_y(top) + hour_label_nudge(hour, paint.text_size),
        );
        surface.draw_text(&hour.get().to_string(), at, paint);
    }

    /// Header band behind the day labels.
    fn draw_header(&self, surface: &mut dyn DrawingSurface, cx: &PaintContext<'_>) {
        let band = Rect::new(
            0.0,
            0.0,
            cx.geometry.viewport().width,
            cx.geometry.layout().header_height,
        );
        surface.draw_rect(band, &cx.palette.header);
    }

    /// Vertical separator at a column's left edge, clipped to the grid body.
    fn draw_column_line(&self, surface: &mut dyn DrawingSurface, cx: &PaintContext<'_>, day: DayIndex) {
        let Some(left) = cx.geometry.day_left(day) else {
            return;
        };
        let x = cx.geometry.screen_x(left);
        let layout = cx.geometry.layout();

        surface.save_clip(cx.body_clip());
        surface.draw_line(
            Point::new(x, layout.header_height),
            Point::new(x, cx.geometry.screen_y(layout.virtual_height)),
            &cx.palette.line,
        );
        surface.restore();
    }

    /// Day label, plus the today pill when `date` is the anchor date,
    /// clipped to the header band.
    fn draw_column_header(
        &self,
        surface: &mut dyn DrawingSurface,
        cx: &PaintContext<'_>,
        day: DayIndex,
        date: NaiveDate,
    ) {
        let (Some(left), Some(width)) = (cx.geometry.day_left(day), cx.geometry.column_width())
        else {
            return;
        };
        let left = cx.geometry.screen_x(left);
        let header_height = cx.geometry.layout().header_height;

        surface.save_clip(cx.header_clip());

        if date == cx.start_date {
            let pill = Rect::new(
                left + width / 6.0,
                TODAY_PILL_INSET,
                left + width * 5.0 / 6.0,
                header_height - TODAY_PILL_INSET,
            );
            let radius = (pill.height() / 2.0).max(0.0);
            surface.draw_round_rect(pill, radius, &cx.palette.today);
        }

        surface.draw_text(
            &column_label(date, cx.day_names),
            Point::new(left + width / 2.0, header_height * 2.0 / 3.0),
            &cx.palette.header_text,
        );

        surface.restore();
    }
}

/// Painter that uses every default hook unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPainter;

impl GridPainter for DefaultPainter {}
