//! Calendar grid (calgrid)
//!
//! A virtually scrolling day-by-hour grid widget with drag-to-pan axis
//! locking, plus a terminal host that drives it.
//!
//! Pure core: `model`, `geometry`, `gesture`, `render`, `widget`.
//! Impure shell: `config`, `logging`, `view`.

pub mod config;
pub mod geometry;
pub mod gesture;
pub mod logging;
pub mod model;
pub mod render;
pub mod view;
pub mod widget;

// Re-export startup integration
pub mod integration;

pub use widget::CalendarGrid;
