/// The actor's size and speed. Its cells live in [`crate::history::History`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Snake {
    pub length: usize,
    /// Pixels moved per tick; always one cell.
    pub velocity: i32,
}

impl Snake {
    #[must_use]
    pub fn new(length: usize, velocity: i32) -> Self {
        Self { length, velocity }
    }

    /// Extends the body by one cell from the next render on.
    pub fn grow(&mut self) {
        self.length += 1;
    }

    /// Points earned so far relative to the starting length.
    #[must_use]
    pub fn score(self, initial_length: usize) -> usize {
        self.length.saturating_sub(initial_length)
    }
}
