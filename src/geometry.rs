use serde::{Deserialize, Serialize};

/// Pixel-space position on the playfield, aligned to the cell grid.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Multiplies both components of `vector` by `factor`.
#[must_use]
pub fn scale(vector: Cell, factor: i32) -> Cell {
    Cell {
        x: vector.x * factor,
        y: vector.y * factor,
    }
}

/// Component-wise sum of two positions.
#[must_use]
pub fn add(a: Cell, b: Cell) -> Cell {
    Cell {
        x: a.x + b.x,
        y: a.y + b.y,
    }
}

/// Exact position match used by every collision, eating and placement check.
#[must_use]
pub fn equal(a: Cell, b: Cell) -> bool {
    a.x == b.x && a.y == b.y
}

/// Playfield dimensions in pixels together with the side length of one cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PlayField {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl PlayField {
    /// Number of cell columns.
    #[must_use]
    pub fn columns(self) -> i32 {
        self.width / self.cell_size
    }

    /// Number of cell rows.
    #[must_use]
    pub fn rows(self) -> i32 {
        self.height / self.cell_size
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::try_from(self.columns()).unwrap_or(0) * usize::try_from(self.rows()).unwrap_or(0)
    }

    /// X coordinate of the rightmost column.
    #[must_use]
    pub fn last_column_x(self) -> i32 {
        self.width - self.cell_size
    }

    /// Y coordinate of the bottom row.
    #[must_use]
    pub fn last_row_y(self) -> i32 {
        self.height - self.cell_size
    }

    /// Returns true when `cell` is on the grid and aligned to it.
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.x < self.width
            && cell.y < self.height
            && cell.x % self.cell_size == 0
            && cell.y % self.cell_size == 0
    }
}
