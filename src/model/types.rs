//! Core widget-state types and newtypes.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::LayoutError;

/// Default width of the hour gutter, in device-independent units.
pub const DEFAULT_HOUR_GUTTER_WIDTH: f32 = 30.0;

/// Default height of the day header band, in device-independent units.
pub const DEFAULT_HEADER_HEIGHT: f32 = 30.0;

/// Default number of simultaneously visible day columns.
pub const DEFAULT_COLUMN_COUNT: u32 = 5;

/// Default height of the virtual (scrollable) surface.
pub const DEFAULT_VIRTUAL_HEIGHT: f32 = 2000.0;

/// Number of hour rows in a day. Hour indices run `0..=HOURS_PER_DAY`.
pub const HOURS_PER_DAY: u8 = 24;

/// A point in device-independent units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - origin`.
    pub fn delta_from(&self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

/// Axis-aligned rectangle given by its edges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl Rect {
    /// Create a rectangle from its four edges.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and a size.
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Width of the rectangle (may be negative for inverted rects).
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height of the rectangle (may be negative for inverted rects).
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// True when the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Half-open containment test: left/top edges inclusive, right/bottom exclusive.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }

    /// Intersection of two rectangles. The result may be empty.
    pub fn intersect(&self, other: &Rect) -> Rect {
        Rect::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        )
    }

    /// Scale every edge by `factor`.
    pub fn scaled(&self, factor: f32) -> Rect {
        Rect::new(
            self.left * factor,
            self.top * factor,
            self.right * factor,
            self.bottom * factor,
        )
    }
}

/// Size of the widget as delivered by the host.
///
/// `width` and `height` are in device-independent units; pointer coordinates
/// arrive in physical units and are divided by `pixel_density`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// Viewport width.
    pub width: f32,
    /// Viewport height.
    pub height: f32,
    /// Physical pixels per device-independent unit.
    pub pixel_density: f32,
}

impl ViewportState {
    /// Create a viewport with a density of 1.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            pixel_density: 1.0,
        }
    }

    /// Same viewport with a different pixel density.
    pub fn with_density(self, pixel_density: f32) -> Self {
        Self {
            pixel_density,
            ..self
        }
    }

    /// Validate a pixel density value before handing it to the widget.
    pub fn check_density(pixel_density: f32) -> Result<f32, LayoutError> {
        if pixel_density.is_finite() && pixel_density > 0.0 {
            Ok(pixel_density)
        } else {
            Err(LayoutError::InvalidDensity(pixel_density))
        }
    }

    /// Density used for delta and scale math. Non-positive or non-finite
    /// densities are treated as 1.
    pub fn effective_density(&self) -> f32 {
        Self::check_density(self.pixel_density).unwrap_or(1.0)
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Scroll position of the virtual surface.
///
/// `horizontal` is unbounded (the day axis extends both ways).
/// `vertical` is kept within `[0, max(0, virtual_height - viewport_height)]`
/// by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollOffsets {
    /// Horizontal offset in device-independent units.
    pub horizontal: f32,
    /// Vertical offset in device-independent units.
    pub vertical: f32,
}

impl ScrollOffsets {
    /// Create new offsets.
    pub fn new(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

/// Layout constants fixed at configuration time.
///
/// Column width is never stored; it is always derived from the viewport
/// width by [`crate::geometry::Geometry::column_width`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConstants {
    /// Width of the left-hand hour gutter.
    pub hour_gutter_width: f32,
    /// Height of the day header band.
    pub header_height: f32,
    /// Number of day columns visible at once.
    pub column_count: u32,
    /// Height of the scrollable virtual surface.
    pub virtual_height: f32,
}

impl Default for LayoutConstants {
    fn default() -> Self {
        Self {
            hour_gutter_width: DEFAULT_HOUR_GUTTER_WIDTH,
            header_height: DEFAULT_HEADER_HEIGHT,
            column_count: DEFAULT_COLUMN_COUNT,
            virtual_height: DEFAULT_VIRTUAL_HEIGHT,
        }
    }
}

impl LayoutConstants {
    /// Strict validation for callers that want to reject degenerate
    /// configurations up front. The widget itself tolerates all of them.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.column_count == 0 {
            return Err(LayoutError::ZeroColumns);
        }

        for (field, value) in [
            ("hour_gutter_width", self.hour_gutter_width),
            ("header_height", self.header_height),
            ("virtual_height", self.virtual_height),
        ] {
            if !value.is_finite() {
                return Err(LayoutError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(LayoutError::Negative { field, value });
            }
        }

        Ok(())
    }
}

/// Anchor date and the derived current date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarAnchor {
    /// Date of day index 0.
    pub start_date: NaiveDate,
    /// `start_date + last visible day index`, refreshed from the latest
    /// horizontal offset. Output only.
    pub current_date: NaiveDate,
}

impl CalendarAnchor {
    /// Anchor whose current date has not been derived yet.
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            current_date: start_date,
        }
    }
}

/// Signed day offset from the anchor date. 0 is the anchor itself.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DayIndex(i64);

impl DayIndex {
    /// The anchor day.
    pub const ANCHOR: Self = Self(0);

    /// Create a day index from a raw signed offset.
    pub fn new(index: i64) -> Self {
        Self(index)
    }

    /// Get the raw signed offset.
    pub fn get(&self) -> i64 {
        self.0
    }

    /// Next day.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Calendar date of this index relative to `anchor`.
    ///
    /// Returns `None` when the result falls outside chrono's date range.
    pub fn date_from(&self, anchor: NaiveDate) -> Option<NaiveDate> {
        if self.0 >= 0 {
            anchor.checked_add_days(Days::new(self.0.unsigned_abs()))
        } else {
            anchor.checked_sub_days(Days::new(self.0.unsigned_abs()))
        }
    }
}

impl From<i64> for DayIndex {
    fn from(index: i64) -> Self {
        Self(index)
    }
}

/// Hour row index, `0..=24`. Index 24 is the closing line of the day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct HourIndex(u8);

impl HourIndex {
    /// Top line of the day.
    pub const FIRST: Self = Self(0);

    /// Bottom line of the day.
    pub const LAST: Self = Self(HOURS_PER_DAY);

    /// Smart constructor. Returns `None` for `hour > 24`.
    pub fn new(hour: u8) -> Option<Self> {
        (hour <= HOURS_PER_DAY).then_some(Self(hour))
    }

    /// Get the raw hour value.
    pub fn get(&self) -> u8 {
        self.0
    }

    /// Every hour index in drawing order.
    pub fn all() -> Vec<HourIndex> {
        (0..=HOURS_PER_DAY).map(Self).collect()
    }
}
