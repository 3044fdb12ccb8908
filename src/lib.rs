pub mod canvas;
pub mod collision;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod geometry;
pub mod history;
pub mod input;
pub mod logging;
pub mod movement;
pub mod renderer;
pub mod scheduler;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
