//! Coordinate transforms and visible-range math (pure).
//!
//! Virtual coordinates place day `d` at `x = d * column_width` and hour `h`
//! at `y = header_height + h * row_height`. Screen coordinates are relative
//! to the widget's top-left corner, with the hour gutter occupying
//! `[0, hour_gutter_width)` on the left.
//!
//! Every function here is a pure function of the viewport, the scroll
//! offsets and the layout constants. Nothing else in the crate computes the
//! column width.

mod visible_range;

pub use visible_range::VisibleDayRange;

use chrono::NaiveDate;

use crate::model::{DayIndex, HourIndex, LayoutConstants, ScrollOffsets, ViewportState};

/// Narrowest drawable day column, in device-independent units.
pub const MIN_COLUMN_WIDTH: f32 = 1.0;

/// Snapshot of everything placement depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    viewport: ViewportState,
    offsets: ScrollOffsets,
    layout: LayoutConstants,
}

impl Geometry {
    /// Build a geometry snapshot.
    pub fn new(viewport: ViewportState, offsets: ScrollOffsets, layout: LayoutConstants) -> Self {
        Self {
            viewport,
            offsets,
            layout,
        }
    }

    /// Viewport this snapshot was taken with.
    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    /// Scroll offsets this snapshot was taken with.
    pub fn offsets(&self) -> &ScrollOffsets {
        &self.offsets
    }

    /// Layout constants this snapshot was taken with.
    pub fn layout(&self) -> &LayoutConstants {
        &self.layout
    }

    /// Width of one day column: `(viewport_width - hour_gutter_width) / column_count`.
    ///
    /// Returns `None` ("no visible columns") when the column count is zero,
    /// the result is not finite, or it is narrower than
    /// [`MIN_COLUMN_WIDTH`]. The floor keeps the visible range at most
    /// `hour_gutter_width + column_count` days wide.
    pub fn column_width(&self) -> Option<f32> {
        if self.layout.column_count == 0 {
            return None;
        }
        let width = (self.viewport.width - self.layout.hour_gutter_width)
            / self.layout.column_count as f32;
        (width.is_finite() && width >= MIN_COLUMN_WIDTH).then_some(width)
    }

    /// Height of one hour row. Cells are square, so this is the column width.
    pub fn row_height(&self) -> Option<f32> {
        self.column_width()
    }

    /// `floor(horizontal_offset / column_width)`.
    pub fn first_visible_day_index(&self) -> Option<DayIndex> {
        let width = self.column_width()?;
        Some(DayIndex::new((self.offsets.horizontal / width).floor() as i64))
    }

    /// `ceil((viewport_width + horizontal_offset) / column_width)`.
    pub fn last_visible_day_index(&self) -> Option<DayIndex> {
        let width = self.column_width()?;
        Some(DayIndex::new(
            ((self.viewport.width + self.offsets.horizontal) / width).ceil() as i64,
        ))
    }

    /// Both ends of the visible day range.
    pub fn visible_day_range(&self) -> Option<VisibleDayRange> {
        let first = self.first_visible_day_index()?;
        let last = self.last_visible_day_index()?;
        // A negative viewport width can invert the ends; there is nothing to show then.
        (first <= last).then(|| VisibleDayRange::new(first, last))
    }

    /// Visible day indices, left to right. Empty when there are no visible columns.
    pub fn visible_day_indices(&self) -> Vec<DayIndex> {
        self.visible_day_range()
            .map(|range| range.indices())
            .unwrap_or_default()
    }

    /// Hour indices considered for drawing: always `0..=24`.
    ///
    /// The vertical offset decides which rows land on screen, not which rows
    /// are enumerated; off-screen rows are left to the surface's clipping.
    pub fn visible_hour_indices(&self) -> Vec<HourIndex> {
        HourIndex::all()
    }

    /// Virtual x of a day column's left edge.
    pub fn day_left(&self, day: DayIndex) -> Option<f32> {
        Some(day.get() as f32 * self.column_width()?)
    }

    /// Virtual y of an hour row's top line.
    pub fn hour_top(&self, hour: HourIndex) -> Option<f32> {
        Some(self.layout.header_height + f32::from(hour.get()) * self.row_height()?)
    }

    /// `virtual_x - horizontal_offset + hour_gutter_width`.
    pub fn screen_x(&self, virtual_x: f32) -> f32 {
        virtual_x - self.offsets.horizontal + self.layout.hour_gutter_width
    }

    /// `virtual_y - vertical_offset`.
    pub fn screen_y(&self, virtual_y: f32) -> f32 {
        virtual_y - self.offsets.vertical
    }

    /// Inverse of [`Geometry::screen_x`].
    pub fn virtual_x(&self, screen_x: f32) -> f32 {
        screen_x + self.offsets.horizontal - self.layout.hour_gutter_width
    }

    /// Inverse of [`Geometry::screen_y`].
    pub fn virtual_y(&self, screen_y: f32) -> f32 {
        screen_y + self.offsets.vertical
    }

    /// Day column under a screen x coordinate.
    ///
    /// `None` inside the hour gutter or when there are no visible columns.
    pub fn day_at(&self, screen_x: f32) -> Option<DayIndex> {
        if screen_x < self.layout.hour_gutter_width {
            return None;
        }
        let width = self.column_width()?;
        Some(DayIndex::new(
            (self.virtual_x(screen_x) / width).floor() as i64,
        ))
    }

    /// Hour row under a screen y coordinate.
    ///
    /// `None` inside the header band, above the first row or below the last.
    pub fn hour_at(&self, screen_y: f32) -> Option<HourIndex> {
        if screen_y < self.layout.header_height {
            return None;
        }
        let height = self.row_height()?;
        let row = (self.virtual_y(screen_y) - self.layout.header_height) / height;
        if !(0.0..f32::from(crate::model::HOURS_PER_DAY)).contains(&row) {
            return None;
        }
        HourIndex::new(row.floor() as u8)
    }

    /// Largest valid vertical offset: `max(0, virtual_height - viewport_height)`.
    pub fn max_vertical_offset(&self) -> f32 {
        max_vertical_offset(&self.layout, &self.viewport)
    }

    /// Clamp a vertical offset into `[0, max_vertical_offset]`.
    pub fn clamp_vertical(&self, vertical: f32) -> f32 {
        clamp_vertical(vertical, self.max_vertical_offset())
    }

    /// Whether the view has been scrolled more than half a viewport away
    /// from the anchor column.
    pub fn is_away_from_anchor(&self) -> bool {
        self.offsets.horizontal.abs() > self.viewport.width / 2.0
    }

    /// `start_date + last_visible_day_index`, or `start_date` itself when no
    /// column is visible or the date would leave chrono's range.
    pub fn end_date(&self, start_date: NaiveDate) -> NaiveDate {
        self.last_visible_day_index()
            .and_then(|last| last.date_from(start_date))
            .unwrap_or(start_date)
    }
}

/// `max(0, virtual_height - viewport_height)`; 0 for non-finite inputs.
pub fn max_vertical_offset(layout: &LayoutConstants, viewport: &ViewportState) -> f32 {
    let max = layout.virtual_height - viewport.height;
    if max.is_finite() {
        max.max(0.0)
    } else {
        0.0
    }
}

/// Clamp `vertical` into `[0, max]`. NaN maps to 0.
pub fn clamp_vertical(vertical: f32, max: f32) -> f32 {
    if vertical.is_nan() {
        return 0.0;
    }
    vertical.min(max).max(0.0)
}
