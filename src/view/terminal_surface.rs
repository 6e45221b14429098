//! Rasterizes grid draw calls into a ratatui [`Buffer`].
//!
//! One cell covers [`CELL_WIDTH`] × [`CELL_HEIGHT`] device-independent
//! units, so after `scale(density)` it covers `density` times as many device
//! units and the grid keeps its footprint at any density. A fill covers
//! every cell whose center lies inside the (clipped) shape. Lines
//! become box-drawing characters and merge into `┼` where they cross.

use std::ops::Range;

use ratatui::buffer::Buffer;
use ratatui::layout;
use ratatui::style::Color as TermColor;
use tracing::trace;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::constants::{CELL_HEIGHT, CELL_WIDTH};
use crate::model::{Point, Rect};
use crate::render::{Color, DrawingSurface, Paint, TextAlign};

const HORIZONTAL: &str = "─";
const VERTICAL: &str = "│";
const CROSS: &str = "┼";

/// Drawing surface backed by a region of a terminal buffer.
pub struct TerminalSurface<'a> {
    buffer: &'a mut Buffer,
    area: layout::Rect,
    scale: f32,
    clips: Vec<Rect>,
}

impl<'a> TerminalSurface<'a> {
    /// Surface drawing into `area` of `buffer`.
    pub fn new(buffer: &'a mut Buffer, area: layout::Rect) -> Self {
        Self {
            buffer,
            area,
            scale: 1.0,
            clips: Vec::new(),
        }
    }

    /// Size of the drawing area in device units at the current scale.
    pub fn device_size(&self) -> (f32, f32) {
        (
            f32::from(self.area.width) * self.cell_width(),
            f32::from(self.area.height) * self.cell_height(),
        )
    }

    /// Width of one cell in device units.
    fn cell_width(&self) -> f32 {
        CELL_WIDTH * self.scale
    }

    /// Height of one cell in device units.
    fn cell_height(&self) -> f32 {
        CELL_HEIGHT * self.scale
    }

    /// Active clip in device units.
    fn clip(&self) -> Rect {
        self.clips.last().copied().unwrap_or_else(|| {
            let (width, height) = self.device_size();
            Rect::new(0.0, 0.0, width, height)
        })
    }

    fn to_device(&self, point: Point) -> Point {
        Point::new(point.x * self.scale, point.y * self.scale)
    }

    fn cell_mut(&mut self, col: u16, row: u16) -> Option<&mut ratatui::buffer::Cell> {
        if col >= self.area.width || row >= self.area.height {
            return None;
        }
        self.buffer
            .cell_mut((self.area.x + col, self.area.y + row))
    }

    fn fill(&mut self, rect: Rect, color: Color) {
        if color.is_transparent() {
            return;
        }
        let rect = rect.scaled(self.scale).intersect(&self.clip());
        if rect.is_empty() {
            return;
        }
        let cols = cell_span(rect.left, rect.right, self.cell_width(), self.area.width);
        for row in cell_span(rect.top, rect.bottom, self.cell_height(), self.area.height) {
            for col in cols.clone() {
                if let Some(cell) = self.cell_mut(col, row) {
                    let bg = blend(color, cell.bg);
                    cell.set_bg(bg);
                }
            }
        }
    }

    fn stroke_cell(&mut self, col: u16, row: u16, symbol: &'static str, color: TermColor) {
        let Some(cell) = self.cell_mut(col, row) else {
            return;
        };
        let merged = match (cell.symbol(), symbol) {
            (VERTICAL, HORIZONTAL) | (HORIZONTAL, VERTICAL) | (CROSS, _) => CROSS,
            _ => symbol,
        };
        cell.set_symbol(merged);
        cell.set_fg(color);
    }
}

/// Cells whose centers fall in `[lo, hi)`, clamped to `0..limit`.
fn cell_span(lo: f32, hi: f32, unit: f32, limit: u16) -> Range<u16> {
    let to_index = |edge: f32| (edge / unit - 0.5).ceil().clamp(0.0, f32::from(limit)) as u16;
    to_index(lo)..to_index(hi)
}

/// Composite `over` onto a cell background. Non-RGB backgrounds (the
/// terminal default) are treated as black.
fn blend(over: Color, under: TermColor) -> TermColor {
    if over.a == 0xff {
        return TermColor::Rgb(over.r, over.g, over.b);
    }
    let (ur, ug, ub) = match under {
        TermColor::Rgb(r, g, b) => (r, g, b),
        _ => (0, 0, 0),
    };
    let alpha = u16::from(over.a);
    let mix = |top: u8, bottom: u8| {
        ((u16::from(top) * alpha + u16::from(bottom) * (255 - alpha)) / 255) as u8
    };
    TermColor::Rgb(mix(over.r, ur), mix(over.g, ug), mix(over.b, ub))
}

fn opaque(color: Color) -> TermColor {
    TermColor::Rgb(color.r, color.g, color.b)
}

impl DrawingSurface for TerminalSurface<'_> {
    fn scale(&mut self, factor: f32) {
        self.scale = if factor.is_finite() && factor > 0.0 {
            factor
        } else {
            1.0
        };
    }

    fn clear(&mut self, color: Color) {
        for row in 0..self.area.height {
            for col in 0..self.area.width {
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.reset();
                    if !color.is_transparent() {
                        cell.set_bg(opaque(color));
                    }
                }
            }
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, paint: &Paint) {
        if paint.color.is_transparent() {
            return;
        }
        let (from, to) = (self.to_device(from), self.to_device(to));
        let clip = self.clip();
        let fg = opaque(paint.color);

        if from.y == to.y {
            if from.y < clip.top || from.y >= clip.bottom || from.y < 0.0 {
                return;
            }
            let row = (from.y / self.cell_height()).floor() as u16;
            let cols = cell_span(
                from.x.min(to.x).max(clip.left),
                from.x.max(to.x).min(clip.right),
                self.cell_width(),
                self.area.width,
            );
            for col in cols {
                self.stroke_cell(col, row, HORIZONTAL, fg);
            }
        } else if from.x == to.x {
            if from.x < clip.left || from.x >= clip.right || from.x < 0.0 {
                return;
            }
            let col = (from.x / self.cell_width()).floor() as u16;
            let rows = cell_span(
                from.y.min(to.y).max(clip.top),
                from.y.max(to.y).min(clip.bottom),
                self.cell_height(),
                self.area.height,
            );
            for row in rows {
                self.stroke_cell(col, row, VERTICAL, fg);
            }
        } else {
            trace!(?from, ?to, "diagonal line skipped");
        }
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        self.fill(rect, paint.color);
    }

    fn draw_round_rect(&mut self, rect: Rect, _radius: f32, paint: &Paint) {
        // Cells have no sub-cell corners to round.
        self.fill(rect, paint.color);
    }

    fn draw_text(&mut self, text: &str, at: Point, paint: &Paint) {
        if paint.color.is_transparent() || text.is_empty() {
            return;
        }
        let at = self.to_device(at);
        let clip = self.clip();

        // Text is anchored by its baseline; place it on the row holding its
        // vertical middle.
        let middle = at.y - paint.text_size * self.scale / 2.0;
        if middle < clip.top || middle >= clip.bottom || middle < 0.0 {
            return;
        }
        let row = (middle / self.cell_height()).floor() as u16;

        let width = text.width() as f32;
        let anchor = at.x / self.cell_width();
        let start = match paint.text_align {
            TextAlign::Left => anchor,
            TextAlign::Center => anchor - width / 2.0,
            TextAlign::Right => anchor - width,
        }
        .round() as i32;

        let visible = cell_span(clip.left, clip.right, self.cell_width(), self.area.width);
        let fg = opaque(paint.color);
        let mut col = start;
        let mut utf8 = [0u8; 4];

        for ch in text.chars() {
            let ch_width = ch.width().unwrap_or(0) as i32;
            if ch_width == 0 {
                continue;
            }
            let fits = col >= i32::from(visible.start) && col + ch_width <= i32::from(visible.end);
            if fits {
                let first = col as u16;
                if let Some(cell) = self.cell_mut(first, row) {
                    cell.set_symbol(ch.encode_utf8(&mut utf8));
                    cell.set_fg(fg);
                }
                // Cells covered by a wide character hold no symbol of their own.
                for covered in 1..ch_width {
                    if let Some(cell) = self.cell_mut(first + covered as u16, row) {
                        let bg = cell.bg;
                        cell.reset();
                        cell.set_bg(bg);
                    }
                }
            }
            col += ch_width;
        }
    }

    fn save_clip(&mut self, rect: Rect) {
        let clip = rect.scaled(self.scale).intersect(&self.clip());
        self.clips.push(clip);
    }

    fn restore(&mut self) {
        self.clips.pop();
    }
}
