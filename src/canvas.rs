use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthChar;

use crate::config::BACKGROUND_COLOR;
use crate::geometry::{Cell, PlayField};
use crate::renderer::Surface;

/// Terminal columns used for one grid cell, so cells look square.
pub const COLUMNS_PER_CELL: u16 = 2;

/// Blank glyph painted with a background colour for each cell half.
const CELL_GLYPH: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq)]
struct TextRun {
    column: i32,
    row: i32,
    text: String,
    color: Color,
}

/// Retained pixel canvas quantised to grid cells.
///
/// Like a browser canvas it keeps whatever was last drawn until it is
/// cleared, so the terminal can repaint it every frame between ticks.
#[derive(Debug, Clone)]
pub struct GridCanvas {
    field: PlayField,
    cells: Vec<Color>,
    texts: Vec<TextRun>,
}

impl GridCanvas {
    #[must_use]
    pub fn new(field: PlayField) -> Self {
        Self {
            field,
            cells: vec![BACKGROUND_COLOR; field.total_cells()],
            texts: Vec::new(),
        }
    }

    /// Terminal size needed to show the whole canvas.
    #[must_use]
    pub fn terminal_size(&self) -> (u16, u16) {
        let columns = u16::try_from(self.field.columns()).unwrap_or(u16::MAX);
        let rows = u16::try_from(self.field.rows()).unwrap_or(u16::MAX);
        (columns.saturating_mul(COLUMNS_PER_CELL), rows)
    }

    /// Colour of the grid cell containing `pixel`.
    #[must_use]
    pub fn color_at(&self, pixel: Cell) -> Option<Color> {
        let column = pixel.x.div_euclid(self.field.cell_size);
        let row = pixel.y.div_euclid(self.field.cell_size);
        self.index(column, row).map(|index| self.cells[index])
    }

    /// Text drawn so far, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.texts.iter().map(|run| run.text.as_str())
    }

    fn index(&self, column: i32, row: i32) -> Option<usize> {
        if column < 0 || row < 0 || column >= self.field.columns() || row >= self.field.rows() {
            return None;
        }
        usize::try_from(row * self.field.columns() + column).ok()
    }

    /// Grid cells covered by a pixel rectangle, clipped to the field.
    fn covered(&self, origin: Cell, width: i32, height: i32) -> (i32, i32, i32, i32) {
        let size = self.field.cell_size;
        let first_column = origin.x.div_euclid(size).max(0);
        let first_row = origin.y.div_euclid(size).max(0);
        let end_column = (origin.x + width + size - 1)
            .div_euclid(size)
            .min(self.field.columns());
        let end_row = (origin.y + height + size - 1)
            .div_euclid(size)
            .min(self.field.rows());
        (first_column, first_row, end_column, end_row)
    }

    fn paint(&mut self, origin: Cell, width: i32, height: i32, color: Color) {
        let (first_column, first_row, end_column, end_row) = self.covered(origin, width, height);
        for row in first_row..end_row {
            for column in first_column..end_column {
                if let Some(index) = self.index(column, row) {
                    self.cells[index] = color;
                }
            }
        }
    }
}

impl Surface for GridCanvas {
    fn clear_rect(&mut self, origin: Cell, width: i32, height: i32) {
        self.paint(origin, width, height, BACKGROUND_COLOR);

        let (first_column, first_row, end_column, end_row) = self.covered(origin, width, height);
        self.texts.retain(|run| {
            !((first_column..end_column).contains(&run.column)
                && (first_row..end_row).contains(&run.row))
        });
    }

    fn fill_rect(&mut self, origin: Cell, width: i32, height: i32, color: Color) {
        self.paint(origin, width, height, color);
    }

    /// Places text in the cell containing its baseline origin. The font is
    /// not representable in a terminal and is ignored.
    fn fill_text(&mut self, text: &str, origin: Cell, _font: &str, color: Color) {
        self.texts.push(TextRun {
            column: origin.x.div_euclid(self.field.cell_size),
            row: origin.y.div_euclid(self.field.cell_size),
            text: text.to_owned(),
            color,
        });
    }
}

impl Widget for &GridCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..self.field.rows() {
            for column in 0..self.field.columns() {
                let Some(index) = self.index(column, row) else {
                    continue;
                };
                let Some((x, y)) = terminal_position(area, column, row) else {
                    continue;
                };
                if x.saturating_add(COLUMNS_PER_CELL) > area.right() {
                    continue;
                }

                buf.set_string(x, y, CELL_GLYPH, Style::new().bg(self.cells[index]));
            }
        }

        for run in &self.texts {
            let Some((x, y)) = terminal_position(area, run.column, run.row) else {
                continue;
            };
            let available = usize::from(area.right().saturating_sub(x));
            let text = clip_to_width(&run.text, available);
            buf.set_string(x, y, text, Style::new().fg(run.color));
        }
    }
}

fn terminal_position(area: Rect, column: i32, row: i32) -> Option<(u16, u16)> {
    let x_offset = u16::try_from(column).ok()?.checked_mul(COLUMNS_PER_CELL)?;
    let y_offset = u16::try_from(row).ok()?;

    let x = area.x.saturating_add(x_offset);
    let y = area.y.saturating_add(y_offset);
    if x >= area.right() || y >= area.bottom() {
        return None;
    }

    Some((x, y))
}

/// Longest prefix of `text` that fits in `width` terminal columns.
fn clip_to_width(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (offset, ch) in text.char_indices() {
        used += ch.width().unwrap_or(0);
        if used > width {
            return &text[..offset];
        }
    }
    text
}
