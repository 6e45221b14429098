//! Dimension constants for the terminal host.
//!
//! The widget works in device-independent units (DIU); the terminal works in
//! character cells. These constants fix the conversion between the two.

/// Width of one character cell in DIU.
///
/// With the default 30-unit gutter the hour labels get four columns.
pub const CELL_WIDTH: f32 = 8.0;

/// Height of one character cell in DIU.
///
/// Terminal cells are roughly twice as tall as they are wide.
pub const CELL_HEIGHT: f32 = 16.0;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// How long the event loop waits for input before checking for repaints.
pub const POLL_INTERVAL_MS: u64 = 250;
