use crate::geometry::{equal, Cell};
use crate::history::History;
use crate::input::Direction;
use crate::movement::candidate_head;

/// Returns true when the next straight step lands on the snake's own body.
///
/// The head and the cell right behind it are excluded from the check.
#[must_use]
pub fn detect_collision(
    history: &History,
    length: usize,
    direction: Direction,
    cell_size: i32,
) -> bool {
    let Some(head) = history.head() else {
        return false;
    };
    // Skipping the last two only drops head and neck when the whole body is retained.
    debug_assert!(history.retained() >= length || history.len() < length);
    let candidate = candidate_head(head, direction, cell_size);

    history
        .body(length)
        .take(length.saturating_sub(2))
        .any(|segment| equal(*segment, candidate))
}

/// Returns true when the next straight step lands on the food.
#[must_use]
pub fn detect_eat(history: &History, food: Cell, direction: Direction, cell_size: i32) -> bool {
    history
        .head()
        .is_some_and(|head| equal(candidate_head(head, direction, cell_size), food))
}
