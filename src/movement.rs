use crate::geometry::{add, scale, Cell, PlayField};
use crate::input::Direction;

/// Computes where the head is drawn next, wrapping across the playfield edges.
///
/// Edge rules are checked in a fixed order (top, bottom, left, right) and
/// only fire when the heading points out through that edge.
#[must_use]
pub fn next_head(head: Cell, direction: Direction, field: PlayField, velocity: i32) -> Cell {
    let vector = direction.vector();

    if head.y == 0 && vector.y == -1 {
        Cell::new(head.x, field.last_row_y())
    } else if head.y == field.last_row_y() && vector.y == 1 {
        Cell::new(head.x, 0)
    } else if head.x == 0 && vector.x == -1 {
        Cell::new(field.last_column_x(), head.y)
    } else if head.x == field.last_column_x() && vector.x == 1 {
        Cell::new(0, head.y)
    } else {
        add(head, scale(vector, velocity))
    }
}

/// One straight step from `head` with no edge wrapping.
///
/// Collision and eat checks use this, so at the edges they look one cell
/// past the boundary rather than at the wrapped cell.
#[must_use]
pub fn candidate_head(head: Cell, direction: Direction, cell_size: i32) -> Cell {
    add(head, scale(direction.vector(), cell_size))
}
