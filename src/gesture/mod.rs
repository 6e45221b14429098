//! Drag-to-pan gesture state machine.
//!
//! A gesture starts on pointer-down, locks to one axis once the pointer has
//! travelled [`SCROLL_THRESHOLD`] units along it, and ends on pointer-up.
//! The machine never touches widget state itself: moves produce an
//! [`OffsetUpdate`] that the widget applies through its setters.

use tracing::debug;

use crate::geometry::clamp_vertical;
use crate::model::{Point, ScrollOffsets};

/// Distance a pointer must travel along one axis before the gesture locks to it.
pub const SCROLL_THRESHOLD: f32 = 30.0;

/// Pan axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Day axis.
    Horizontal,
    /// Hour axis.
    Vertical,
}

/// Externally visible state of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    /// No pointer is down.
    #[default]
    Idle,
    /// Pointer is down, axis not decided yet.
    Locking,
    /// Dragging along the day axis.
    PanningHorizontal,
    /// Dragging along the hour axis.
    PanningVertical,
}

/// One pointer-down..pointer-up interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// Where the pointer went down.
    pub origin: Point,
    /// Offsets at pointer-down; every move is computed relative to these.
    pub origin_offsets: ScrollOffsets,
    /// Axis chosen for this session. Set at most once.
    pub axis_lock: Option<Axis>,
}

/// Limits a move is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollBounds {
    /// Physical pixels per device-independent unit.
    pub pixel_density: f32,
    /// `max(0, virtual_height - viewport_height)`. Zero disables vertical panning.
    pub max_vertical_offset: f32,
}

impl ScrollBounds {
    /// Whether the content is taller than the viewport.
    pub fn can_pan_vertically(&self) -> bool {
        self.max_vertical_offset > 0.0
    }

    fn density(&self) -> f32 {
        if self.pixel_density.is_finite() && self.pixel_density > 0.0 {
            self.pixel_density
        } else {
            1.0
        }
    }
}

/// New offset produced by a move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OffsetUpdate {
    /// New horizontal offset (unclamped).
    Horizontal(f32),
    /// New vertical offset (already clamped).
    Vertical(f32),
}

/// Scroll gesture state machine.
///
/// The session exists exactly while a pointer is down; `Idle` is the
/// absence of a session.
#[derive(Debug, Clone, Default)]
pub struct GestureMachine {
    session: Option<GestureSession>,
}

impl GestureMachine {
    /// Create an idle machine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> GestureState {
        match self.session.map(|s| s.axis_lock) {
            None => GestureState::Idle,
            Some(None) => GestureState::Locking,
            Some(Some(Axis::Horizontal)) => GestureState::PanningHorizontal,
            Some(Some(Axis::Vertical)) => GestureState::PanningVertical,
        }
    }

    /// Active session, if a pointer is down.
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// True while a pointer is down.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Start a session. Ignored (returns `false`) while one is already active.
    pub fn pointer_down(&mut self, at: Point, offsets: ScrollOffsets) -> bool {
        if self.session.is_some() {
            debug!(x = at.x, y = at.y, "pointer-down ignored: gesture already active");
            return false;
        }

        self.session = Some(GestureSession {
            origin: at,
            origin_offsets: offsets,
            axis_lock: None,
        });
        debug!(x = at.x, y = at.y, "gesture started");
        true
    }

    /// Feed a pointer move.
    ///
    /// While locking, returns `None` and possibly decides the axis. Once
    /// locked, returns the new offset for the locked axis. Absolute position
    /// is irrelevant; only the delta from the session origin is used.
    pub fn pointer_move(&mut self, at: Point, bounds: ScrollBounds) -> Option<OffsetUpdate> {
        let session = self.session.as_mut()?;
        let delta = at.delta_from(session.origin);
        let lock = session.axis_lock;

        match lock {
            None => {
                if delta.x.abs() >= SCROLL_THRESHOLD {
                    session.axis_lock = Some(Axis::Horizontal);
                    debug!(dx = delta.x, "gesture locked to horizontal axis");
                } else if delta.y.abs() >= SCROLL_THRESHOLD && bounds.can_pan_vertically() {
                    session.axis_lock = Some(Axis::Vertical);
                    debug!(dy = delta.y, "gesture locked to vertical axis");
                }
                None
            }
            Some(Axis::Horizontal) => Some(OffsetUpdate::Horizontal(
                session.origin_offsets.horizontal - delta.x / bounds.density(),
            )),
            Some(Axis::Vertical) => Some(OffsetUpdate::Vertical(clamp_vertical(
                session.origin_offsets.vertical - delta.y / bounds.density(),
                bounds.max_vertical_offset,
            ))),
        }
    }

    /// End the session from whatever state the machine is in.
    pub fn pointer_up(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(axis = ?session.axis_lock, "gesture ended");
        }
    }

    /// Drop an in-progress session without further effect.
    ///
    /// Used when the host sets offsets programmatically mid-drag: the
    /// programmatic change wins and the drag is treated as completed.
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(axis = ?session.axis_lock, "gesture cancelled by programmatic scroll");
        }
    }
}

#[cfg(test)]
#[path = "gesture_tests.rs"]
mod tests;
