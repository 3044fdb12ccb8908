use std::time::Duration;

use wrap_snake::config::{GameConfig, SNAKE_COLOR};
use wrap_snake::food::Food;
use wrap_snake::game::Game;
use wrap_snake::geometry::Cell;
use wrap_snake::input::Direction;
use wrap_snake::renderer::RecordingSurface;

const TICK_MS: u64 = 400;

fn at_tick(tick: u64) -> Duration {
    Duration::from_millis(tick * TICK_MS)
}

fn seeded_game(seed: u64) -> Game {
    Game::new(GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    })
    .expect("default config should start")
}

fn park_food(game: &mut Game) {
    game.session_mut().food = Food::new(Cell::new(0, 0), 1);
}

#[test]
fn moving_right_grows_history_one_cell_per_tick() {
    let mut game = seeded_game(42);
    park_food(&mut game);
    let mut surface = RecordingSurface::new();

    for tick in 1..=3 {
        game.advance(at_tick(tick), &mut surface).expect("tick");
        assert_eq!(game.session().history.len(), 3 + tick as usize);
    }

    assert_eq!(game.restarts(), 0);
    assert_eq!(
        surface.last_cells(SNAKE_COLOR),
        vec![
            Cell::new(180, 150),
            Cell::new(190, 150),
            Cell::new(200, 150)
        ]
    );
}

#[test]
fn looping_into_the_body_restarts_exactly_once() {
    let mut game = seeded_game(7);
    game.session_mut().food = Food::new(Cell::new(180, 150), 2);
    let mut surface = RecordingSurface::new();

    game.advance(at_tick(1), &mut surface).expect("eat");
    assert_eq!(game.session().snake.length, 4);
    park_food(&mut game);

    game.apply_input(Direction::Down);
    game.advance(at_tick(2), &mut surface).expect("down");
    game.apply_input(Direction::Left);
    game.advance(at_tick(3), &mut surface).expect("left");
    assert_eq!(game.restarts(), 0);

    game.apply_input(Direction::Up);
    game.advance(at_tick(4), &mut surface).expect("collide");

    assert_eq!(game.restarts(), 1);
    assert_eq!(game.session().snake.length, 3);
    assert_eq!(game.session().direction, Direction::Right);
    assert_eq!(game.session().history.len(), 3);
    assert_eq!(surface.last_score(), Some("0"));

    // The fresh session counts its own periods from the restart.
    park_food(&mut game);
    game.advance(at_tick(4) + Duration::from_millis(399), &mut surface)
        .expect("idle");
    assert_eq!(game.session().history.len(), 3);
    game.advance(at_tick(5), &mut surface).expect("tick");
    assert_eq!(game.session().history.len(), 4);
    assert_eq!(game.restarts(), 1);
}

#[test]
fn reversing_a_short_snake_does_not_collide() {
    let mut game = seeded_game(9);
    park_food(&mut game);
    let mut surface = RecordingSurface::new();

    game.apply_input(Direction::Left);
    game.advance(at_tick(1), &mut surface).expect("reverse");

    assert_eq!(game.restarts(), 0);
    assert_eq!(game.session().history.head(), Some(Cell::new(160, 150)));
}

#[test]
fn wrapping_around_the_right_edge_keeps_the_row() {
    let mut game = seeded_game(11);
    park_food(&mut game);
    let mut surface = RecordingSurface::new();

    // Head starts at x = 170; 12 ticks reach x = 290, the 13th wraps to 0.
    game.advance(at_tick(13), &mut surface).expect("ticks");

    assert_eq!(game.session().history.head(), Some(Cell::new(0, 150)));
    assert_eq!(game.restarts(), 0);
}

#[test]
fn long_run_fires_every_render_tick_and_refreshes_food() {
    let mut game = Game::new(GameConfig {
        seed: Some(3),
        food_refresh_period_ms: 4_000,
        ..GameConfig::default()
    })
    .expect("config should start");
    let mut surface = RecordingSurface::new();

    // Poll in uneven steps the way the terminal loop does.
    let mut now = Duration::ZERO;
    while now < Duration::from_millis(20_000) {
        now += Duration::from_millis(16);
        game.advance(now, &mut surface).expect("tick");
    }

    assert_eq!(surface.frames(), 50);
    assert_eq!(game.restarts(), 0);
    assert_eq!(game.session().history.len(), 53);
    assert_eq!(game.scheduler().active_count(), 2);
}
