use rand::Rng;
use tracing::warn;

use crate::error::SpawnError;
use crate::geometry::{Cell, PlayField};
use crate::history::History;

/// The single live food item of a session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Cell,
    pub score: usize,
}

impl Food {
    #[must_use]
    pub fn new(position: Cell, score: usize) -> Self {
        Self { position, score }
    }

    /// Spawns food outside the current body (the last `length` history cells).
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        field: PlayField,
        history: &History,
        length: usize,
        max_attempts: u32,
    ) -> Result<Self, SpawnError> {
        let position = spawn_position(rng, field, history, length, max_attempts)?;
        Ok(Self {
            position,
            score: food_score(rng, length),
        })
    }
}

/// Uniform value in `[0, length)`; an empty snake scores 1.
#[must_use]
pub fn food_score<R: Rng + ?Sized>(rng: &mut R, length: usize) -> usize {
    if length == 0 {
        return 1;
    }
    rng.gen_range(0..length)
}

/// Picks a grid-aligned cell not covered by the body.
///
/// The last column and row are never used. Uniform sampling is tried
/// `max_attempts` times; after that every free candidate is collected and
/// one is chosen uniformly, so the call always terminates.
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    field: PlayField,
    history: &History,
    length: usize,
    max_attempts: u32,
) -> Result<Cell, SpawnError> {
    let columns = field.columns() - 1;
    let rows = field.rows() - 1;
    if columns <= 0 || rows <= 0 {
        return Err(SpawnError::NoFreeCell { candidates: 0 });
    }

    for _ in 0..max_attempts {
        let candidate = Cell::new(
            rng.gen_range(0..columns) * field.cell_size,
            rng.gen_range(0..rows) * field.cell_size,
        );
        if !history.body_contains(length, candidate) {
            return Ok(candidate);
        }
    }

    let mut free = Vec::new();
    for row in 0..rows {
        for column in 0..columns {
            let cell = Cell::new(column * field.cell_size, row * field.cell_size);
            if !history.body_contains(length, cell) {
                free.push(cell);
            }
        }
    }

    warn!(
        attempts = max_attempts,
        free_cells = free.len(),
        "food sampling exhausted, falling back to full scan"
    );

    if free.is_empty() {
        let candidates = usize::try_from(columns * rows).unwrap_or(0);
        return Err(SpawnError::NoFreeCell { candidates });
    }

    let index = rng.gen_range(0..free.len());
    Ok(free[index])
}
