use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Food placement failure: every candidate cell is covered by the body.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum SpawnError {
    #[error("no free cell for food among {candidates} candidate cells")]
    NoFreeCell { candidates: usize },
}

/// Rejected configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cell size must be positive, got {0}")]
    CellSize(i32),
    #[error("canvas {width}x{height} is not a multiple of cell size {cell_size}")]
    Misaligned {
        width: i32,
        height: i32,
        cell_size: i32,
    },
    #[error("playfield needs at least 2 columns and 2 rows, got {columns}x{rows}")]
    TooSmall { columns: i32, rows: i32 },
    #[error("playfield {columns}x{rows} exceeds the {max_columns}x{max_rows} cells a terminal can show")]
    TooLarge {
        columns: i32,
        rows: i32,
        max_columns: i32,
        max_rows: i32,
    },
    #[error("initial length must be at least 1")]
    InitialLength,
    #[error("initial body starting at ({x}, {y}) does not fit on the grid")]
    StartOutOfField { x: i32, y: i32 },
    #[error("{name} period must be positive")]
    Period { name: &'static str },
    #[error("max spawn attempts must be positive")]
    SpawnAttempts,
}

/// Top-level failure surfaced by the game loop.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Spawn(#[from] SpawnError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
}
