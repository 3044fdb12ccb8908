use ratatui::style::Color;

use crate::config::{FOOD_COLOR, SCORE_COLOR, SCORE_FONT, SCORE_ORIGIN, SNAKE_COLOR};
use crate::geometry::{Cell, PlayField};
use crate::session::Session;

/// Canvas-style drawing target. Coordinates are playfield pixels.
pub trait Surface {
    fn clear_rect(&mut self, origin: Cell, width: i32, height: i32);
    fn fill_rect(&mut self, origin: Cell, width: i32, height: i32, color: Color);
    fn fill_text(&mut self, text: &str, origin: Cell, font: &str, color: Color);
}

/// Draws one full frame: cleared field, snake, score, then food.
pub fn render_session<S: Surface + ?Sized>(surface: &mut S, field: PlayField, session: &Session) {
    surface.clear_rect(Cell::new(0, 0), field.width, field.height);

    for segment in session.body() {
        surface.fill_rect(*segment, field.cell_size, field.cell_size, SNAKE_COLOR);
    }

    surface.fill_text(
        &session.score().to_string(),
        SCORE_ORIGIN,
        SCORE_FONT,
        SCORE_COLOR,
    );

    surface.fill_rect(
        session.food.position,
        field.cell_size,
        field.cell_size,
        FOOD_COLOR,
    );
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Clear {
        origin: Cell,
        width: i32,
        height: i32,
    },
    Rect {
        origin: Cell,
        size: i32,
        color: Color,
    },
    Text {
        text: String,
        origin: Cell,
        color: Color,
    },
}

/// Headless surface that keeps every call, for tests and replays.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls made since the most recent full clear.
    #[must_use]
    pub fn last_frame(&self) -> &[DrawOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, DrawOp::Clear { .. }))
            .unwrap_or(0);
        &self.ops[start..]
    }

    /// Number of full frames drawn.
    #[must_use]
    pub fn frames(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Clear { .. }))
            .count()
    }

    /// Score text of the most recent frame.
    #[must_use]
    pub fn last_score(&self) -> Option<&str> {
        self.last_frame().iter().find_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Cells filled with `color` in the most recent frame.
    #[must_use]
    pub fn last_cells(&self, color: Color) -> Vec<Cell> {
        self.last_frame()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect {
                    origin,
                    color: fill,
                    ..
                } if *fill == color => Some(*origin),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, origin: Cell, width: i32, height: i32) {
        self.ops.push(DrawOp::Clear {
            origin,
            width,
            height,
        });
    }

    fn fill_rect(&mut self, origin: Cell, width: i32, _height: i32, color: Color) {
        self.ops.push(DrawOp::Rect {
            origin,
            size: width,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, origin: Cell, _font: &str, color: Color) {
        self.ops.push(DrawOp::Text {
            text: text.to_owned(),
            origin,
            color,
        });
    }
}
