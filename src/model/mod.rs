//! Widget state model (pure).
//!
//! Plain data with smart constructors; no drawing and no event handling.

pub mod day_names;
pub mod error;
pub mod types;

// Re-export for convenience
pub use day_names::{DayNameLookup, Locale, UnknownLocale};
pub use error::{AppError, LayoutError};
pub use types::{
    CalendarAnchor, DayIndex, HourIndex, LayoutConstants, Point, Rect, ScrollOffsets,
    ViewportState, DEFAULT_COLUMN_COUNT, DEFAULT_HEADER_HEIGHT, DEFAULT_HOUR_GUTTER_WIDTH,
    DEFAULT_VIRTUAL_HEIGHT, HOURS_PER_DAY,
};
