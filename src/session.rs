use rand::Rng;

use crate::collision::{detect_collision, detect_eat};
use crate::config::GameConfig;
use crate::error::SpawnError;
use crate::food::Food;
use crate::geometry::{Cell, PlayField};
use crate::history::History;
use crate::input::Direction;
use crate::movement::next_head;
use crate::scheduler::TimerHandle;
use crate::snake::Snake;

/// The two periodic schedules owned by one session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SessionTimers {
    pub render: TimerHandle,
    pub food_refresh: TimerHandle,
}

impl SessionTimers {
    #[must_use]
    pub fn contains(self, handle: TimerHandle) -> bool {
        self.render == handle || self.food_refresh == handle
    }
}

/// Complete mutable state of one running game.
///
/// A restart never edits a session in place; the controller drops it and
/// starts a fresh one.
#[derive(Debug, Clone)]
pub struct Session {
    pub snake: Snake,
    pub history: History,
    pub food: Food,
    pub direction: Direction,
    pub timers: SessionTimers,
    initial_length: usize,
}

impl Session {
    /// Seeds the body at the configured start, heading right, with fresh food.
    pub fn start<R: Rng + ?Sized>(
        config: &GameConfig,
        rng: &mut R,
        timers: SessionTimers,
    ) -> Result<Self, SpawnError> {
        let snake = Snake::new(config.initial_length, config.cell_size);
        let history = History::seeded(
            config.start,
            config.initial_length,
            config.cell_size,
            config.history_capacity(),
        );
        let food = Food::spawn(
            rng,
            config.playfield(),
            &history,
            snake.length,
            config.max_spawn_attempts,
        )?;

        Ok(Self {
            snake,
            history,
            food,
            direction: Direction::Right,
            timers,
            initial_length: config.initial_length,
        })
    }

    /// Cells currently occupied by the snake, tail first.
    pub fn body(&self) -> impl Iterator<Item = &Cell> {
        self.history.body(self.snake.length)
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.snake.score(self.initial_length)
    }

    #[must_use]
    pub fn initial_length(&self) -> usize {
        self.initial_length
    }

    /// True when the next step would run into the body.
    #[must_use]
    pub fn collides(&self, field: PlayField) -> bool {
        detect_collision(
            &self.history,
            self.snake.length,
            self.direction,
            field.cell_size,
        )
    }

    /// Grows the snake and replaces the food when the next step reaches it.
    ///
    /// The replacement is placed against the already-grown body.
    pub fn try_eat<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        config: &GameConfig,
    ) -> Result<bool, SpawnError> {
        if !detect_eat(
            &self.history,
            self.food.position,
            self.direction,
            config.cell_size,
        ) {
            return Ok(false);
        }

        self.snake.grow();
        self.respawn_food(rng, config)?;
        Ok(true)
    }

    /// Installs a newly spawned food, whether or not the old one was eaten.
    pub fn respawn_food<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        config: &GameConfig,
    ) -> Result<(), SpawnError> {
        self.food = Food::spawn(
            rng,
            config.playfield(),
            &self.history,
            self.snake.length,
            config.max_spawn_attempts,
        )?;
        Ok(())
    }

    /// Appends the wrapped next head to the history.
    pub fn advance_head(&mut self, field: PlayField) {
        let Some(head) = self.history.head() else {
            return;
        };
        let next = next_head(head, self.direction, field, self.snake.velocity);
        self.history.push(next);
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{Session, SessionTimers};
    use crate::config::GameConfig;
    use crate::food::Food;
    use crate::geometry::Cell;
    use crate::input::Direction;
    use crate::scheduler::{Scheduler, TimerEvent};

    fn new_session(seed: u64) -> (Session, StdRng, GameConfig) {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut scheduler = Scheduler::new();
        let timers = SessionTimers {
            render: scheduler.schedule_periodic(TimerEvent::Render, config.render_period()),
            food_refresh: scheduler
                .schedule_periodic(TimerEvent::FoodRefresh, config.food_refresh_period()),
        };
        let session = Session::start(&config, &mut rng, timers).expect("session should start");
        (session, rng, config)
    }

    #[test]
    fn fresh_session_has_seeded_body_and_free_food() {
        let (session, _, _) = new_session(1);

        let body: Vec<_> = session.body().copied().collect();
        assert_eq!(
            body,
            vec![
                Cell::new(150, 150),
                Cell::new(160, 150),
                Cell::new(170, 150)
            ]
        );
        assert_eq!(session.direction, Direction::Right);
        assert_eq!(session.score(), 0);
        assert!(!session.history.body_contains(3, session.food.position));
    }

    #[test]
    fn eating_grows_by_one_and_moves_food_off_the_body() {
        let (mut session, mut rng, config) = new_session(2);
        session.food = Food::new(Cell::new(180, 150), 1);

        let ate = session.try_eat(&mut rng, &config).expect("food should respawn");

        assert!(ate);
        assert_eq!(session.snake.length, 4);
        assert_eq!(session.score(), 1);
        assert!(!session.history.body_contains(4, session.food.position));
    }

    #[test]
    fn missing_the_food_changes_nothing() {
        let (mut session, mut rng, config) = new_session(3);
        session.food = Food::new(Cell::new(0, 0), 2);

        let ate = session.try_eat(&mut rng, &config).expect("no spawn needed");

        assert!(!ate);
        assert_eq!(session.snake.length, 3);
        assert_eq!(session.food, Food::new(Cell::new(0, 0), 2));
    }

    #[test]
    fn advancing_appends_exactly_one_cell() {
        let (mut session, _, config) = new_session(4);

        session.advance_head(config.playfield());

        assert_eq!(session.history.len(), 4);
        assert_eq!(session.history.head(), Some(Cell::new(180, 150)));
        assert_eq!(session.body().count(), 3);
    }
}
