use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};
use tracing::info;
use wrap_snake::canvas::GridCanvas;
use wrap_snake::config::GameConfig;
use wrap_snake::error::GameError;
use wrap_snake::game::Game;
use wrap_snake::input::{GameInput, InputHandler};
use wrap_snake::logging::init_file_logging;
use wrap_snake::terminal_runtime::{AppTerminal, TerminalSession};

const FRAME_SLEEP: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Read settings from this JSON file instead of the per-user config.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between movement ticks.
    #[arg(long = "render-ms")]
    render_ms: Option<u64>,

    /// Milliseconds between forced food respawns.
    #[arg(long = "food-refresh-ms")]
    food_refresh_ms: Option<u64>,

    /// Append diagnostics to this file (filter with RUST_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit.
    #[arg(long = "print-config")]
    print_config: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<GameConfig, GameError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::load_default()?,
        };

        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(render_ms) = self.render_ms {
            config.render_period_ms = render_ms;
        }
        if let Some(food_refresh_ms) = self.food_refresh_ms {
            config.food_refresh_period_ms = food_refresh_ms;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match try_main(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("wrap-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: &Cli) -> Result<(), GameError> {
    if let Some(path) = &cli.log_file {
        init_file_logging(path)?;
    }

    let config = cli.resolve_config()?;
    if cli.print_config {
        let json = serde_json::to_string_pretty(&config)
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;
        println!("{json}");
        return Ok(());
    }

    let game = Game::new(config)?;

    let mut session = TerminalSession::enter()?;
    run(game, session.terminal_mut())
}

fn run(mut game: Game, terminal: &mut AppTerminal) -> Result<(), GameError> {
    let mut input = InputHandler::new();
    let mut canvas = GridCanvas::new(game.config().playfield());
    game.draw(&mut canvas);

    let started = Instant::now();
    loop {
        terminal.draw(|frame| draw_frame(frame, &canvas, &game))?;

        match input.poll_input()? {
            Some(GameInput::Quit) => break,
            Some(GameInput::Direction(direction)) => game.apply_input(direction),
            None => {}
        }

        game.advance(started.elapsed(), &mut canvas)?;
        thread::sleep(FRAME_SLEEP);
    }

    info!(
        restarts = game.restarts(),
        length = game.session().snake.length,
        "quit"
    );
    Ok(())
}

fn draw_frame(frame: &mut Frame<'_>, canvas: &GridCanvas, game: &Game) {
    let (width, height) = canvas.terminal_size();
    let [board_row, footer] = Layout::vertical([
        Constraint::Length(height.saturating_add(2)),
        Constraint::Length(1),
    ])
    .areas(frame.area());
    let [board, _] = Layout::horizontal([
        Constraint::Length(width.saturating_add(2)),
        Constraint::Min(0),
    ])
    .areas(board_row);

    let block = Block::bordered()
        .title(" wrap-snake ")
        .border_style(Style::new().fg(Color::DarkGray));
    let inner = block.inner(board);
    frame.render_widget(block, board);
    frame.render_widget(canvas, inner);

    let status = format!(
        "[Arrows] Steer  [Q] Quit  restarts {}  seed {}",
        game.restarts(),
        game.seed()
    );
    frame.render_widget(
        Paragraph::new(Line::from(status)).style(Style::default().fg(Color::DarkGray)),
        footer,
    );
}
