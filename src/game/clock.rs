//! Fixed-timestep simulation clock.
//!
//! Every rendered frame, [`Clock::begin_frame()`] adds the wall-clock time
//! since the previous frame to an accumulator.  The session then runs one
//! logical tick for each whole move interval in the accumulator, consuming
//! that much time per tick, so the snake moves at the same speed whatever the
//! frame rate.  The leftover fraction of an interval is used to slide the
//! snake smoothly between cells.
//!
//! The move interval shrinks as the snake eats, down to a floor.  Frame
//! deltas are capped so that a stalled terminal resumes with a few catch-up
//! ticks at most rather than a burst of dozens.
use crate::consts;
use std::time::{Duration, Instant};
use tracing::warn;

/// Timing parameters for a game
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ClockParams {
    /// Move interval at the start of a game
    pub(crate) initial_interval: Duration,

    /// The move interval never drops below this
    pub(crate) min_interval: Duration,

    /// Factor applied to the move interval on each speed-up
    pub(crate) acceleration: f64,

    /// Largest frame delta fed to the accumulator
    pub(crate) max_frame_delta: Duration,
}

impl Default for ClockParams {
    fn default() -> ClockParams {
        ClockParams {
            initial_interval: consts::INITIAL_INTERVAL,
            min_interval: consts::MIN_INTERVAL,
            acceleration: consts::ACCELERATION,
            max_frame_delta: consts::MAX_FRAME_DELTA,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Clock {
    params: ClockParams,
    interval: Duration,
    accumulator: Duration,
    last_frame: Option<Instant>,
}

impl Clock {
    pub(crate) fn new(params: ClockParams) -> Clock {
        Clock {
            params,
            interval: params.initial_interval.max(params.min_interval),
            accumulator: Duration::ZERO,
            last_frame: None,
        }
    }

    /// The current time between two logical ticks
    pub(crate) fn interval(&self) -> Duration {
        self.interval
    }

    /// Add the time elapsed since the previous frame to the accumulator.  The
    /// first frame adds nothing.
    pub(crate) fn begin_frame(&mut self, now: Instant) {
        let mut delta = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_frame = Some(now);
        if delta > self.params.max_frame_delta {
            warn!(
                delta_ms = delta.as_millis(),
                cap_ms = self.params.max_frame_delta.as_millis(),
                "Frame delta too large; capping"
            );
            delta = self.params.max_frame_delta;
        }
        self.accumulator += delta;
    }

    /// If at least one move interval's worth of time has accumulated, consume
    /// it and return `true`
    pub(crate) fn take_tick(&mut self) -> bool {
        if self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            true
        } else {
            false
        }
    }

    /// Shorten the move interval by the acceleration factor, stopping at the
    /// floor
    pub(crate) fn accelerate(&mut self) {
        self.interval = self
            .interval
            .mul_f64(self.params.acceleration)
            .max(self.params.min_interval);
    }

    /// How far between the previous and the next tick the current frame is,
    /// in `[0, 1]`
    pub(crate) fn alpha(&self) -> f64 {
        if self.interval.is_zero() {
            return 0.0;
        }
        (self.accumulator.as_secs_f64() / self.interval.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Throw away any accumulated time
    pub(crate) fn halt(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}
