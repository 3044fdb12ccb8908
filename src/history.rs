use std::collections::VecDeque;

use crate::geometry::{equal, Cell};

/// Ordered record of every cell the head has visited.
///
/// Only the most recent `capacity` cells are retained; the body is always a
/// suffix no longer than the grid, so older cells can never be observed.
/// `len` counts every cell ever appended and never decreases.
#[derive(Debug, Clone)]
pub struct History {
    cells: VecDeque<Cell>,
    capacity: usize,
    appended: usize,
}

impl History {
    /// Creates an empty history retaining at most `capacity` cells.
    ///
    /// Storage grows with the cells pushed, not with `capacity`.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            cells: VecDeque::new(),
            capacity,
            appended: 0,
        }
    }

    /// Seeds a history with `length` cells laid out to the right of `start`.
    #[must_use]
    pub fn seeded(start: Cell, length: usize, cell_size: i32, capacity: usize) -> Self {
        let mut history = Self::with_capacity(capacity.max(length));
        let mut cell = start;
        for _ in 0..length {
            history.push(cell);
            cell.x += cell_size;
        }
        history
    }

    /// Appends a new head position, evicting the oldest retained cell when full.
    pub fn push(&mut self, cell: Cell) {
        if self.cells.len() == self.capacity {
            let _ = self.cells.pop_front();
        }
        self.cells.push_back(cell);
        self.appended += 1;
    }

    /// Most recent head position.
    #[must_use]
    pub fn head(&self) -> Option<Cell> {
        self.cells.back().copied()
    }

    /// Total number of cells ever appended.
    #[must_use]
    pub fn len(&self) -> usize {
        self.appended
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.appended == 0
    }

    /// Number of cells currently kept in memory.
    #[must_use]
    pub fn retained(&self) -> usize {
        self.cells.len()
    }

    /// Last `length` cells, oldest first.
    pub fn body(&self, length: usize) -> impl Iterator<Item = &Cell> {
        let skip = self.cells.len().saturating_sub(length);
        self.cells.iter().skip(skip)
    }

    /// Returns true if `cell` is one of the last `length` cells.
    #[must_use]
    pub fn body_contains(&self, length: usize, cell: Cell) -> bool {
        self.body(length).any(|segment| equal(*segment, cell))
    }
}

#[cfg(test)]
mod tests {
    use super::History;
    use crate::geometry::Cell;

    #[test]
    fn seeded_history_extends_right_from_start() {
        let history = History::seeded(Cell::new(150, 150), 3, 10, 16);

        let cells: Vec<_> = history.body(3).copied().collect();
        assert_eq!(
            cells,
            vec![
                Cell::new(150, 150),
                Cell::new(160, 150),
                Cell::new(170, 150)
            ]
        );
        assert_eq!(history.head(), Some(Cell::new(170, 150)));
    }

    #[test]
    fn body_is_suffix_of_requested_length() {
        let mut history = History::seeded(Cell::new(0, 0), 3, 10, 16);
        history.push(Cell::new(30, 0));

        let body: Vec<_> = history.body(2).copied().collect();
        assert_eq!(body, vec![Cell::new(20, 0), Cell::new(30, 0)]);
        assert!(history.body_contains(2, Cell::new(20, 0)));
        assert!(!history.body_contains(2, Cell::new(10, 0)));
    }

    #[test]
    fn huge_capacity_allocates_lazily() {
        let mut history = History::with_capacity(usize::MAX);
        history.push(Cell::new(0, 0));
        history.push(Cell::new(10, 0));

        assert_eq!(history.retained(), 2);
        assert_eq!(history.head(), Some(Cell::new(10, 0)));
    }

    #[test]
    fn ring_evicts_oldest_but_length_keeps_growing() {
        let mut history = History::with_capacity(4);
        for x in 0..10 {
            history.push(Cell::new(x * 10, 0));
        }

        assert_eq!(history.len(), 10);
        assert_eq!(history.retained(), 4);
        assert_eq!(history.body(100).count(), 4);
        assert_eq!(history.body(1).next(), Some(&Cell::new(90, 0)));
    }
}
