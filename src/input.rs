use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::geometry::Cell;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector for this heading, with y growing downwards.
    #[must_use]
    pub fn vector(self) -> Cell {
        match self {
            Self::Up => Cell::new(0, -1),
            Self::Down => Cell::new(0, 1),
            Self::Left => Cell::new(-1, 0),
            Self::Right => Cell::new(1, 0),
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Quit,
}

/// Maps one key press to a game input. Unrecognised keys yield `None` and
/// leave the current heading untouched.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Up => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right => Some(GameInput::Direction(Direction::Right)),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(GameInput::Quit),
        _ => None,
    }
}

/// Non-blocking keyboard reader.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Drains pending terminal events and returns the most recent mapped input.
    ///
    /// Several arrow presses between two polls collapse to the last one, and
    /// `Quit` wins over any direction seen in the same batch.
    pub fn poll_input(&mut self) -> io::Result<Option<GameInput>> {
        let mut latest = None;

        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };

            match map_key(key) {
                Some(GameInput::Quit) => return Ok(Some(GameInput::Quit)),
                Some(input) => latest = Some(input),
                None => {}
            }
        }

        Ok(latest)
    }
}
