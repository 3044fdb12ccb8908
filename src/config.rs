use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::canvas::COLUMNS_PER_CELL;
use crate::error::ConfigError;
use crate::geometry::{Cell, PlayField};

const APP_DIR_NAME: &str = "wrap-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: i32 = 300;

/// Default canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: i32 = 200;

/// Side length of one grid cell in pixels; also the per-tick snake velocity.
pub const DEFAULT_CELL_SIZE: i32 = 10;

/// Snake length at the start of every session.
pub const DEFAULT_INITIAL_LENGTH: usize = 3;

/// Tail cell of the seeded body; the body extends to the right from here.
pub const DEFAULT_START: Cell = Cell::new(150, 150);

/// Render tick period in milliseconds.
pub const DEFAULT_RENDER_PERIOD_MS: u64 = 400;

/// Forced food respawn period in milliseconds.
pub const DEFAULT_FOOD_REFRESH_PERIOD_MS: u64 = 20_000;

/// Random samples tried before food placement falls back to a full scan.
pub const DEFAULT_MAX_SPAWN_ATTEMPTS: u32 = 1024;

/// Widest grid that still fits a terminal line at two columns per cell.
pub const MAX_COLUMNS: i32 = (u16::MAX / COLUMNS_PER_CELL) as i32;

/// Tallest grid a terminal can address.
pub const MAX_ROWS: i32 = u16::MAX as i32;

pub const BACKGROUND_COLOR: Color = Color::Black;
pub const SNAKE_COLOR: Color = Color::White;
pub const FOOD_COLOR: Color = Color::Rgb(255, 192, 203);
pub const SCORE_COLOR: Color = Color::White;
pub const SCORE_FONT: &str = "14px Arial";
pub const SCORE_ORIGIN: Cell = Cell::new(10, 24);

/// Tunable game parameters, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub canvas_width: i32,
    pub canvas_height: i32,
    pub cell_size: i32,
    pub initial_length: usize,
    pub start: Cell,
    pub render_period_ms: u64,
    pub food_refresh_period_ms: u64,
    pub max_spawn_attempts: u32,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            initial_length: DEFAULT_INITIAL_LENGTH,
            start: DEFAULT_START,
            render_period_ms: DEFAULT_RENDER_PERIOD_MS,
            food_refresh_period_ms: DEFAULT_FOOD_REFRESH_PERIOD_MS,
            max_spawn_attempts: DEFAULT_MAX_SPAWN_ATTEMPTS,
            seed: None,
        }
    }
}

/// Returns the platform-correct config file path.
#[must_use]
pub fn default_config_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    base
}

impl GameConfig {
    /// Loads a config file that must exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(path, &raw)
    }

    /// Loads the per-user config file, falling back to defaults when it does
    /// not exist yet.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = default_config_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        Self::parse(&path, &raw)
    }

    fn parse(path: &Path, raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks every invariant the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size <= 0 {
            return Err(ConfigError::CellSize(self.cell_size));
        }

        if self.canvas_width <= 0
            || self.canvas_height <= 0
            || self.canvas_width % self.cell_size != 0
            || self.canvas_height % self.cell_size != 0
        {
            return Err(ConfigError::Misaligned {
                width: self.canvas_width,
                height: self.canvas_height,
                cell_size: self.cell_size,
            });
        }

        let field = self.playfield();
        if field.columns() < 2 || field.rows() < 2 {
            return Err(ConfigError::TooSmall {
                columns: field.columns(),
                rows: field.rows(),
            });
        }

        if field.columns() > MAX_COLUMNS || field.rows() > MAX_ROWS {
            return Err(ConfigError::TooLarge {
                columns: field.columns(),
                rows: field.rows(),
                max_columns: MAX_COLUMNS,
                max_rows: MAX_ROWS,
            });
        }

        if self.initial_length == 0 {
            return Err(ConfigError::InitialLength);
        }

        let trailing = i64::try_from(self.initial_length - 1).unwrap_or(i64::MAX);
        let head_x = i64::from(self.start.x)
            .saturating_add(trailing.saturating_mul(i64::from(self.cell_size)));
        if !field.contains(self.start) || head_x > i64::from(field.last_column_x()) {
            return Err(ConfigError::StartOutOfField {
                x: self.start.x,
                y: self.start.y,
            });
        }

        if self.render_period_ms == 0 {
            return Err(ConfigError::Period { name: "render" });
        }

        if self.food_refresh_period_ms == 0 {
            return Err(ConfigError::Period {
                name: "food refresh",
            });
        }

        if self.max_spawn_attempts == 0 {
            return Err(ConfigError::SpawnAttempts);
        }

        Ok(())
    }

    #[must_use]
    pub fn playfield(&self) -> PlayField {
        PlayField {
            width: self.canvas_width,
            height: self.canvas_height,
            cell_size: self.cell_size,
        }
    }

    #[must_use]
    pub fn render_period(&self) -> Duration {
        Duration::from_millis(self.render_period_ms)
    }

    #[must_use]
    pub fn food_refresh_period(&self) -> Duration {
        Duration::from_millis(self.food_refresh_period_ms)
    }

    /// Number of cells the history ring must keep so the longest possible
    /// body is always available as a suffix.
    #[must_use]
    pub fn history_capacity(&self) -> usize {
        self.playfield().total_cells().max(self.initial_length) + 1
    }
}
