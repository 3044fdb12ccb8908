use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::error::{GameError, SpawnError};
use crate::geometry::PlayField;
use crate::input::Direction;
use crate::renderer::{render_session, Surface};
use crate::scheduler::{Scheduler, TimerEvent};
use crate::session::{Session, SessionTimers};

/// Owns the running session and drives it from the timer facility.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    field: PlayField,
    seed: u64,
    rng: StdRng,
    scheduler: Scheduler,
    session: Session,
    restarts: u64,
}

impl Game {
    /// Validates `config` and starts the first session.
    ///
    /// Without a configured seed one is drawn from entropy and logged, so a
    /// run can be reproduced.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut scheduler = Scheduler::new();
        let session = start_session(&config, &mut rng, &mut scheduler)?;

        info!(seed, "game started");

        Ok(Self {
            field: config.playfield(),
            config,
            seed,
            rng,
            scheduler,
            session,
            restarts: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Number of collision-triggered restarts so far.
    #[must_use]
    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    /// Replaces the heading; the next render tick uses whatever was set last.
    pub fn apply_input(&mut self, direction: Direction) {
        self.session.direction = direction;
    }

    /// Draws the current session without advancing it.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        render_session(surface, self.field, &self.session);
    }

    /// Runs every tick due up to `now` (time since the game started), in order.
    pub fn advance<S: Surface + ?Sized>(
        &mut self,
        now: Duration,
        surface: &mut S,
    ) -> Result<(), GameError> {
        while let Some((handle, event)) = self.scheduler.pop_due(now) {
            debug_assert!(self.session.timers.contains(handle));

            match event {
                TimerEvent::Render => self.on_render_tick(surface)?,
                TimerEvent::FoodRefresh => self.on_food_refresh()?,
            }
        }

        self.scheduler.settle(now);
        Ok(())
    }

    fn on_render_tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<(), GameError> {
        if self.session.collides(self.field) {
            self.restart()?;
            self.draw(surface);
            return Ok(());
        }

        if self.session.try_eat(&mut self.rng, &self.config)? {
            debug!(
                length = self.session.snake.length,
                food = ?self.session.food.position,
                "food eaten"
            );
        }

        self.session.advance_head(self.field);
        self.draw(surface);
        Ok(())
    }

    fn on_food_refresh(&mut self) -> Result<(), GameError> {
        self.session.respawn_food(&mut self.rng, &self.config)?;
        debug!(food = ?self.session.food.position, "food refreshed");
        Ok(())
    }

    /// Cancels both timers and replaces the session wholesale.
    fn restart(&mut self) -> Result<(), GameError> {
        let timers = self.session.timers;
        self.scheduler.cancel(timers.render);
        self.scheduler.cancel(timers.food_refresh);

        info!(
            length = self.session.snake.length,
            score = self.session.score(),
            ticks = self.session.history.len(),
            "self collision, restarting"
        );

        self.session = start_session(&self.config, &mut self.rng, &mut self.scheduler)?;
        self.restarts += 1;
        Ok(())
    }
}

fn start_session(
    config: &GameConfig,
    rng: &mut StdRng,
    scheduler: &mut Scheduler,
) -> Result<Session, SpawnError> {
    let timers = SessionTimers {
        render: scheduler.schedule_periodic(TimerEvent::Render, config.render_period()),
        food_refresh: scheduler
            .schedule_periodic(TimerEvent::FoodRefresh, config.food_refresh_period()),
    };

    match Session::start(config, rng, timers) {
        Ok(session) => Ok(session),
        Err(error) => {
            scheduler.cancel(timers.render);
            scheduler.cancel(timers.food_refresh);
            Err(error)
        }
    }
}
