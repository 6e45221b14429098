//! Drawing surface contract and a recording implementation.

use serde::{Deserialize, Serialize};

use super::palette::Color;
use crate::model::{Point, Rect};

/// Horizontal anchoring of text relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Position is the left edge.
    #[default]
    Left,
    /// Position is the horizontal center.
    Center,
    /// Position is the right edge.
    Right,
}

/// Fill or outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintStyle {
    /// Fill the shape.
    #[default]
    Fill,
    /// Outline the shape.
    Stroke,
}

/// How a primitive is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    /// Color of the primitive.
    pub color: Color,
    /// Fill or stroke.
    pub style: PaintStyle,
    /// Line width for strokes.
    pub stroke_width: f32,
    /// Text size; text is positioned by its baseline.
    pub text_size: f32,
    /// Text alignment.
    pub text_align: TextAlign,
}

impl Paint {
    /// Solid fill.
    pub fn fill(color: Color) -> Self {
        Self {
            color,
            style: PaintStyle::Fill,
            stroke_width: 0.0,
            text_size: 0.0,
            text_align: TextAlign::Left,
        }
    }

    /// Outline of the given width.
    pub fn stroke(color: Color, stroke_width: f32) -> Self {
        Self {
            style: PaintStyle::Stroke,
            stroke_width,
            ..Self::fill(color)
        }
    }

    /// Text paint.
    pub fn text(color: Color, text_size: f32, text_align: TextAlign) -> Self {
        Self {
            text_size,
            text_align,
            ..Self::fill(color)
        }
    }
}

/// Immediate-mode 2D surface the grid is drawn onto.
///
/// Coordinates are device-independent units relative to the widget's
/// top-left corner. `scale` is called once at the start of each frame with
/// the pixel density. `save_clip` pushes a clip rectangle that stays in
/// effect, intersected with any outer clip, until the matching `restore`.
pub trait DrawingSurface {
    /// Apply a uniform scale to everything drawn afterwards in this frame.
    fn scale(&mut self, factor: f32);

    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Straight line segment.
    fn draw_line(&mut self, from: Point, to: Point, paint: &Paint);

    /// Axis-aligned rectangle.
    fn draw_rect(&mut self, rect: Rect, paint: &Paint);

    /// Rectangle with rounded corners.
    fn draw_round_rect(&mut self, rect: Rect, radius: f32, paint: &Paint);

    /// Text positioned by its baseline; alignment and size come from `paint`.
    fn draw_text(&mut self, text: &str, at: Point, paint: &Paint);

    /// Save state and restrict drawing to `rect`.
    fn save_clip(&mut self, rect: Rect);

    /// Undo the most recent `save_clip`.
    fn restore(&mut self);
}

/// One recorded drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// `DrawingSurface::scale`.
    Scale {
        /// Scale factor.
        factor: f32,
    },
    /// `DrawingSurface::clear`.
    Clear {
        /// Clear color.
        color: Color,
    },
    /// `DrawingSurface::draw_line`.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Paint used.
        paint: Paint,
    },
    /// `DrawingSurface::draw_rect`.
    Rect {
        /// Rectangle drawn.
        rect: Rect,
        /// Paint used.
        paint: Paint,
    },
    /// `DrawingSurface::draw_round_rect`.
    RoundRect {
        /// Rectangle drawn.
        rect: Rect,
        /// Corner radius.
        radius: f32,
        /// Paint used.
        paint: Paint,
    },
    /// `DrawingSurface::draw_text`.
    Text {
        /// Text drawn.
        text: String,
        /// Baseline anchor.
        at: Point,
        /// Paint used.
        paint: Paint,
    },
    /// `DrawingSurface::save_clip`.
    SaveClip {
        /// Clip rectangle.
        rect: Rect,
    },
    /// `DrawingSurface::restore`.
    Restore,
}

/// Surface that records every call instead of drawing.
///
/// Used by tests to assert on the exact draw sequence and by the binary to
/// dump a frame as JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recording empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Text of every `Text` command, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawingSurface for RecordingSurface {
    fn scale(&mut self, factor: f32) {
        self.commands.push(DrawCommand::Scale { factor });
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear { color });
    }

    fn draw_line(&mut self, from: Point, to: Point, paint: &Paint) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            paint: *paint,
        });
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(DrawCommand::Rect {
            rect,
            paint: *paint,
        });
    }

    fn draw_round_rect(&mut self, rect: Rect, radius: f32, paint: &Paint) {
        self.commands.push(DrawCommand::RoundRect {
            rect,
            radius,
            paint: *paint,
        });
    }

    fn draw_text(&mut self, text: &str, at: Point, paint: &Paint) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            paint: *paint,
        });
    }

    fn save_clip(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::SaveClip { rect });
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }
}
