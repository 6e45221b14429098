//! The calendar grid widget.
//!
//! [`CalendarGrid`] owns every piece of mutable state (viewport, offsets,
//! anchor, gesture session) and exposes two surfaces:
//!
//! - host callbacks (`on_resize`, `on_pointer_*`, `on_repaint_requested`)
//!   that a UI toolkit wires to its event loop;
//! - plain setters for programmatic control. Each setter performs its
//!   dependent recomputation before returning and requests a repaint.
//!
//! Repaint requests are a pending flag. The host drains it with
//! [`CalendarGrid::take_repaint_request`] and calls
//! [`CalendarGrid::on_repaint_requested`] when it is set.

use chrono::NaiveDate;
use tracing::debug;

use crate::geometry::Geometry;
use crate::gesture::{GestureMachine, GestureState, OffsetUpdate, ScrollBounds};
use crate::model::{
    CalendarAnchor, DayNameLookup, LayoutConstants, Locale, Point, ScrollOffsets, ViewportState,
};
use crate::render::{
    render_frame, DefaultPainter, DrawingSurface, FrameSummary, GridPainter, PaintContext,
    Palette,
};

/// Interactive day-by-hour grid.
pub struct CalendarGrid<P: GridPainter = DefaultPainter> {
    viewport: ViewportState,
    offsets: ScrollOffsets,
    layout: LayoutConstants,
    anchor: CalendarAnchor,
    gesture: GestureMachine,
    palette: Palette,
    painter: P,
    day_names: Box<dyn DayNameLookup>,
    away_from_anchor: bool,
    repaint_requested: bool,
}

impl CalendarGrid<DefaultPainter> {
    /// Widget anchored at `start_date` with the default painter, palette and
    /// Korean day names. The viewport is empty until the first `on_resize`.
    pub fn new(start_date: NaiveDate, layout: LayoutConstants) -> Self {
        Self {
            viewport: ViewportState::default(),
            offsets: ScrollOffsets::default(),
            layout,
            anchor: CalendarAnchor::new(start_date),
            gesture: GestureMachine::new(),
            palette: Palette::default(),
            painter: DefaultPainter,
            day_names: Box::new(Locale::default()),
            away_from_anchor: false,
            repaint_requested: true,
        }
    }
}

impl<P: GridPainter> CalendarGrid<P> {
    /// Swap the drawing strategy, keeping all state.
    pub fn with_painter<Q: GridPainter>(self, painter: Q) -> CalendarGrid<Q> {
        CalendarGrid {
            viewport: self.viewport,
            offsets: self.offsets,
            layout: self.layout,
            anchor: self.anchor,
            gesture: self.gesture,
            palette: self.palette,
            painter,
            day_names: self.day_names,
            away_from_anchor: self.away_from_anchor,
            repaint_requested: true,
        }
    }

    /// Replace the paint set. Paints are read-only once the widget runs.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self.repaint_requested = true;
        self
    }

    /// Replace the weekday naming.
    pub fn with_day_names(mut self, day_names: impl DayNameLookup + 'static) -> Self {
        self.day_names = Box::new(day_names);
        self.repaint_requested = true;
        self
    }

    // ===== Host callbacks =====

    /// Host resized the widget (device-independent units).
    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.viewport.width = width;
        self.viewport.height = height;
        self.offsets.vertical = self.geometry().clamp_vertical(self.offsets.vertical);
        self.refresh_horizontal();
        debug!(width, height, "viewport resized");
        self.request_repaint();
    }

    /// Host changed the physical-pixels-per-unit ratio.
    ///
    /// Invalid densities are stored as-is and treated as 1 wherever density
    /// is used.
    pub fn set_pixel_density(&mut self, pixel_density: f32) {
        self.viewport.pixel_density = pixel_density;
        self.request_repaint();
    }

    /// Pointer pressed. Ignored while a gesture is already in progress.
    pub fn on_pointer_down(&mut self, x: f32, y: f32) {
        self.gesture.pointer_down(Point::new(x, y), self.offsets);
    }

    /// Pointer moved. Applies the locked axis' new offset, if any.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        let bounds = ScrollBounds {
            pixel_density: self.viewport.pixel_density,
            max_vertical_offset: self.geometry().max_vertical_offset(),
        };

        match self.gesture.pointer_move(Point::new(x, y), bounds) {
            Some(OffsetUpdate::Horizontal(horizontal)) => self.apply_horizontal(horizontal),
            Some(OffsetUpdate::Vertical(vertical)) => self.apply_vertical(vertical),
            None => {}
        }
    }

    /// Pointer released. Always returns the gesture to idle.
    pub fn on_pointer_up(&mut self, _x: f32, _y: f32) {
        self.gesture.pointer_up();
    }

    /// Draw one frame onto `surface`.
    ///
    /// Reclamps the vertical offset first so a frame never shows an
    /// out-of-range position, then publishes the frame's current date.
    pub fn on_repaint_requested(&mut self, surface: &mut dyn DrawingSurface) -> FrameSummary {
        self.offsets.vertical = self.geometry().clamp_vertical(self.offsets.vertical);

        let geometry = self.geometry();
        let cx = PaintContext {
            geometry: &geometry,
            palette: &self.palette,
            day_names: self.day_names.as_ref(),
            start_date: self.anchor.start_date,
        };
        let summary = render_frame(surface, &self.painter, &cx);

        self.anchor.current_date = summary.current_date;
        self.repaint_requested = false;
        summary
    }

    // ===== Repaint plumbing =====

    /// Ask the host for a new frame.
    pub fn request_repaint(&mut self) {
        self.repaint_requested = true;
    }

    /// Whether a repaint is pending, clearing the flag.
    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.repaint_requested)
    }

    /// Whether a repaint is pending.
    pub fn needs_repaint(&self) -> bool {
        self.repaint_requested
    }

    // ===== Programmatic setters =====
    //
    // Each one ends an in-progress drag first: a programmatic change counts
    // as a completed gesture.

    /// Scroll the day axis to an absolute offset.
    pub fn set_horizontal_offset(&mut self, horizontal: f32) {
        self.gesture.cancel();
        self.apply_horizontal(horizontal);
    }

    /// Scroll the hour axis to an absolute offset, clamped to the valid range.
    pub fn set_vertical_offset(&mut self, vertical: f32) {
        self.gesture.cancel();
        let vertical = self.geometry().clamp_vertical(vertical);
        self.apply_vertical(vertical);
    }

    /// Move the anchor. Day index 0 becomes `start_date`.
    pub fn set_start_date(&mut self, start_date: NaiveDate) {
        self.gesture.cancel();
        self.anchor.start_date = start_date;
        self.refresh_horizontal();
        self.request_repaint();
    }

    /// Change the height of the scrollable surface, reclamping the offset.
    pub fn set_virtual_height(&mut self, virtual_height: f32) {
        self.set_layout(LayoutConstants {
            virtual_height,
            ..self.layout
        });
    }

    /// Replace all layout constants at once.
    pub fn set_layout(&mut self, layout: LayoutConstants) {
        self.gesture.cancel();
        self.layout = layout;
        self.offsets.vertical = self.geometry().clamp_vertical(self.offsets.vertical);
        self.refresh_horizontal();
        self.request_repaint();
    }

    /// Return to the anchor column.
    pub fn scroll_to_anchor(&mut self) {
        self.set_horizontal_offset(0.0);
    }

    /// Scroll by whole columns. Negative values go back in time.
    ///
    /// No-op when there are no visible columns.
    pub fn scroll_by_days(&mut self, days: i64) {
        if let Some(width) = self.geometry().column_width() {
            self.set_horizontal_offset(self.offsets.horizontal + days as f32 * width);
        }
    }

    /// Scroll by whole rows, clamped. Negative values scroll up.
    pub fn scroll_by_hours(&mut self, hours: i32) {
        if let Some(height) = self.geometry().row_height() {
            self.set_vertical_offset(self.offsets.vertical + hours as f32 * height);
        }
    }

    // ===== Getters =====

    /// Geometry snapshot of the current state.
    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.viewport, self.offsets, self.layout)
    }

    /// Current viewport.
    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    /// Current scroll offsets.
    pub fn offsets(&self) -> ScrollOffsets {
        self.offsets
    }

    /// Current horizontal offset.
    pub fn horizontal_offset(&self) -> f32 {
        self.offsets.horizontal
    }

    /// Current vertical offset.
    pub fn vertical_offset(&self) -> f32 {
        self.offsets.vertical
    }

    /// Layout constants in effect.
    pub fn layout(&self) -> LayoutConstants {
        self.layout
    }

    /// Anchor date (day index 0).
    pub fn start_date(&self) -> NaiveDate {
        self.anchor.start_date
    }

    /// Date of the last visible column as of the latest offset change or frame.
    pub fn current_date(&self) -> NaiveDate {
        self.anchor.current_date
    }

    /// Whether the view is more than half a viewport away from the anchor.
    pub fn is_away_from_anchor(&self) -> bool {
        self.away_from_anchor
    }

    /// Month of the current date in the configured language.
    pub fn month_label(&self) -> String {
        self.day_names.month_label(self.anchor.current_date)
    }

    /// Date shown in the column under a screen x coordinate.
    pub fn date_at(&self, screen_x: f32) -> Option<NaiveDate> {
        self.geometry()
            .day_at(screen_x)
            .and_then(|day| day.date_from(self.anchor.start_date))
    }

    /// State of the drag gesture.
    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    /// Paint set in use.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    // ===== Internals =====

    fn apply_horizontal(&mut self, horizontal: f32) {
        self.offsets.horizontal = horizontal;
        self.refresh_horizontal();
        self.request_repaint();
    }

    fn apply_vertical(&mut self, vertical: f32) {
        self.offsets.vertical = vertical;
        self.request_repaint();
    }

    /// Recompute everything derived from the horizontal offset.
    fn refresh_horizontal(&mut self) {
        let geometry = self.geometry();
        let away = geometry.is_away_from_anchor();
        if away != self.away_from_anchor {
            debug!(away, horizontal = self.offsets.horizontal, "anchor visibility changed");
        }
        self.away_from_anchor = away;
        self.anchor.current_date = geometry.end_date(self.anchor.start_date);
    }
}

#[cfg(test)]
#[path = "widget_tests.rs"]
mod tests;
