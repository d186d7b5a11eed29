//! Cosmetic bounce applied to snake segments.
//!
//! Each segment carries a [`Bounce`]: a height above the segment's resting
//! place on the board plus a vertical speed.  Eating food kicks every segment
//! upwards; on every rendered frame gravity pulls the segment back down, and
//! when it reaches its resting place it bounces back up with some speed lost.
//! None of this has any bearing on where the snake logically is.
use crate::consts;
use serde::Deserialize;

/// Tunable constants for the bounce animation
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(try_from = "crate::config::RawPhysicsConfig")]
pub(crate) struct PhysicsParams {
    /// Height added to every segment when the snake grows
    pub(crate) push: f64,

    /// Speed lost to gravity on every frame
    pub(crate) gravity: f64,

    /// Fraction of speed kept on each bounce; must be less than 1
    pub(crate) bounce: f64,

    /// A segment on the ground moving slower than this comes to rest
    pub(crate) rest_epsilon: f64,
}

impl Default for PhysicsParams {
    fn default() -> PhysicsParams {
        PhysicsParams {
            push: consts::PUSH_FORCE,
            gravity: consts::GRAVITY,
            bounce: consts::BOUNCE,
            rest_epsilon: consts::REST_EPSILON,
        }
    }
}

/// Vertical displacement of a single segment
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Bounce {
    /// Height above the resting place, in physics units; never negative
    offset: f64,

    /// Upwards speed in physics units per frame
    velocity: f64,
}

impl Bounce {
    #[cfg(test)]
    pub(crate) fn lifted(offset: f64) -> Bounce {
        Bounce {
            offset,
            velocity: 0.0,
        }
    }

    pub(crate) fn offset(self) -> f64 {
        self.offset
    }

    #[cfg(test)]
    pub(crate) fn is_settled(self) -> bool {
        self.offset <= 0.0 && self.velocity.abs() < f64::EPSILON
    }

    /// Kick the segment upwards
    pub(crate) fn push(&mut self, params: &PhysicsParams) {
        self.offset += params.push;
    }

    /// Advance the animation by one frame
    pub(crate) fn step(&mut self, params: &PhysicsParams) {
        if self.offset <= 0.0 && self.velocity.abs() < params.rest_epsilon {
            *self = Bounce::default();
            return;
        }
        self.velocity -= params.gravity;
        self.offset += self.velocity;
        if self.offset <= 0.0 && self.velocity < 0.0 {
            self.offset = 0.0;
            self.velocity *= -params.bounce;
            if self.velocity < params.rest_epsilon {
                self.velocity = 0.0;
            }
        }
    }
}
