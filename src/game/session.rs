use super::clock::{Clock, ClockParams};
use super::direction::{Direction, Steering};
use super::food::{place_food, Food};
use super::grid::{Cell, Grid};
use super::physics::PhysicsParams;
use super::snake::{Collision, Snake, Step};
use super::snapshot::{FoodView, RenderSnapshot, SegmentView};
use crate::consts;
use rand::Rng;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Where the snake starts out and which way it is initially heading
const START_CELL: Cell = Cell::new(5, 5);
const START_DIRECTION: Direction = Direction::Right;

/// Settings fixed for the length of a game
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SessionParams {
    pub(crate) grid_size: u16,
    pub(crate) clock: ClockParams,

    /// `None` if segments should not bounce
    pub(crate) physics: Option<PhysicsParams>,
}

impl Default for SessionParams {
    fn default() -> SessionParams {
        SessionParams {
            grid_size: consts::GRID_SIZE,
            clock: ClockParams::default(),
            physics: Some(PhysicsParams::default()),
        }
    }
}

/// All of the state of a single game, from start to game over
#[derive(Clone, Debug)]
pub(crate) struct GameSession<R = rand::rngs::ThreadRng> {
    rng: R,
    grid: Grid,
    snake: Snake,

    /// Index of the track riding on each segment of the snake, head first
    riding: Vec<usize>,

    food: Option<Food>,
    steering: Steering,
    score: u32,
    clock: Clock,
    physics: Option<PhysicsParams>,
    track_count: usize,
    started: Instant,

    /// Time of the most recent frame, or of the end of the game
    latest: Instant,

    status: Status,
}

impl<R: Rng> GameSession<R> {
    /// Start a new game at time `now` with `track_count` tracks available
    /// for food.
    ///
    /// # Errors
    ///
    /// Returns `Err` if there are fewer than [`MIN_TRACKS`] tracks.
    ///
    /// [`MIN_TRACKS`]: consts::MIN_TRACKS
    pub(crate) fn start(
        params: SessionParams,
        track_count: usize,
        rng: R,
        now: Instant,
    ) -> Result<GameSession<R>, SessionError> {
        if track_count < consts::MIN_TRACKS {
            return Err(SessionError::InsufficientTracks {
                found: track_count,
                required: consts::MIN_TRACKS,
            });
        }
        let mut session = GameSession {
            rng,
            grid: Grid::new(params.grid_size),
            snake: Snake::new(START_CELL),
            riding: vec![0],
            food: None,
            steering: Steering::new(START_DIRECTION),
            score: 0,
            clock: Clock::new(params.clock),
            physics: params.physics,
            track_count,
            started: now,
            latest: now,
            status: Status::Running,
        };
        session.clock.begin_frame(now);
        let mut events = Vec::new();
        session.spawn_food(&mut events);
        info!(grid_size = params.grid_size, track_count, "Game started");
        Ok(session)
    }

    /// Run the simulation up to time `now`: zero or more logical ticks
    /// followed by one frame of the bounce animation.  Returns the notable
    /// things that happened during the ticks.
    pub(crate) fn frame(&mut self, now: Instant) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if !self.is_running() {
            return events;
        }
        self.latest = now;
        self.clock.begin_frame(now);
        while self.is_running() && self.clock.take_tick() {
            self.tick(&mut events);
        }
        if self.is_running() {
            if let Some(ref physics) = self.physics {
                self.snake.animate(physics);
            }
        }
        events
    }

    /// Advance the snake by one cell
    fn tick(&mut self, events: &mut Vec<SessionEvent>) {
        let direction = self.steering.commit();
        match self.snake.step(direction, self.grid, self.food.map(|f| f.cell)) {
            Step::Crashed(collision) => {
                self.end(Status::Dead(collision));
                events.push(SessionEvent::Crashed(collision));
            }
            Step::Moved => {
                if self.riding.len() > self.snake.len() {
                    let _ = self.riding.pop();
                }
                if self.food.is_none() {
                    self.spawn_food(events);
                }
            }
            Step::Grew => {
                let Some(food) = self.food.take() else {
                    unreachable!("snake grew without food");
                };
                self.score += consts::FOOD_SCORE;
                self.riding.insert(0, food.track);
                self.clock.accelerate();
                if let Some(ref physics) = self.physics {
                    self.snake.push(physics);
                }
                debug!(
                    score = self.score,
                    length = self.snake.len(),
                    interval_ms = self.clock.interval().as_millis(),
                    "Ate food at {}",
                    food.cell
                );
                events.push(SessionEvent::Ate { track: food.track });
                self.spawn_food(events);
            }
        }
    }

    fn spawn_food(&mut self, events: &mut Vec<SessionEvent>) {
        if self.snake.len() >= self.grid.area() {
            self.food = None;
            self.end(Status::BoardFull);
            events.push(SessionEvent::BoardFull);
            return;
        }
        match place_food(
            &mut self.rng,
            self.grid,
            &self.snake,
            &self.riding,
            self.track_count,
        ) {
            Ok(food) => {
                debug!(track = food.track, "Placed food at {}", food.cell);
                self.food = Some(food);
            }
            Err(e) => {
                warn!("Could not place food, will retry next tick: {e}");
                self.food = None;
            }
        }
    }
}

impl<R> GameSession<R> {
    /// Ask the snake to turn on the next tick.  Reversals are ignored, as is
    /// everything once the game is over.
    pub(crate) fn steer(&mut self, direction: Direction) -> bool {
        self.is_running() && self.steering.turn(direction)
    }

    pub(crate) fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    #[cfg(test)]
    pub(crate) fn status(&self) -> Status {
        self.status
    }

    pub(crate) fn grid_size(&self) -> u16 {
        self.grid.size()
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn current_direction(&self) -> Direction {
        self.steering.current()
    }

    /// Time played so far; stops counting at game over
    pub(crate) fn elapsed(&self) -> Duration {
        self.latest.saturating_duration_since(self.started)
    }

    fn end(&mut self, status: Status) {
        self.status = status;
        self.clock.halt();
        self.snake.freeze();
        info!(score = self.score, length = self.snake.len(), ?status, "Game over");
    }

    /// Describe the current frame for drawing
    pub(crate) fn snapshot(&self) -> RenderSnapshot {
        let alpha = self.clock.alpha();
        let segments = self
            .snake
            .segments()
            .enumerate()
            .map(|(i, seg)| SegmentView {
                x: lerp(seg.prev.x, seg.cell.x, alpha),
                y: lerp(seg.prev.y, seg.cell.y, alpha),
                lift: seg.bounce.offset() / consts::TILE_UNITS,
                track: self.riding.get(i).copied(),
            })
            .collect();
        let pulse = (self.elapsed().as_secs_f64() / consts::PULSE_PERIOD.as_secs_f64()).sin()
            * 0.1
            + 1.0;
        RenderSnapshot {
            grid_size: self.grid.size(),
            segments,
            food: self.food.map(|food| FoodView { food, pulse }),
            score: self.score,
            elapsed: self.elapsed(),
            status: self.status,
        }
    }
}

fn lerp(from: i32, to: i32, alpha: f64) -> f64 {
    let from = f64::from(from);
    (f64::from(to) - from).mul_add(alpha, from)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Status {
    Running,
    Dead(Collision),

    /// The snake covers the whole board, leaving nowhere to put food
    BoardFull,
}

/// Something that happened during a frame that the game's surroundings may
/// want to react to
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SessionEvent {
    Ate { track: usize },
    Crashed(Collision),
    BoardFull,
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum SessionError {
    #[error("only {found} playable tracks found; at least {required} are needed")]
    InsufficientTracks { found: usize, required: usize },
}
