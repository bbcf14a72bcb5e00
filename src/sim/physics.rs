//! Actor physics: constant gravity plus an overwriting flap impulse

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::{TILT_GAIN, TILT_MAX, TILT_MIN};

/// The player-controlled falling square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Left edge, fixed after construction
    x: f32,
    /// Top edge (grows downward)
    pub y: f32,
    /// Vertical velocity per tick (positive = falling)
    pub vel_y: f32,
    /// Edge length of the bounding square
    pub size: f32,
    /// Display tilt in degrees, derived from velocity
    pub tilt: f32,
}

impl Actor {
    pub fn new(x: f32, size: f32) -> Self {
        Self {
            x,
            y: 0.0,
            vel_y: 0.0,
            size,
            tilt: 0.0,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Place the actor's top edge at the vertical center and stop it
    pub fn recenter(&mut self, playfield_height: f32) {
        self.y = playfield_height / 2.0;
        self.vel_y = 0.0;
        self.tilt = 0.0;
    }

    /// Integrate one step of gravity.
    ///
    /// Rising above the top edge is not lethal: the actor is held at `y = 0`
    /// with its upward velocity cancelled.
    pub fn advance(&mut self, gravity: f32, dt: f32) {
        self.vel_y += gravity * dt;
        self.y += self.vel_y * dt;

        if self.y < 0.0 {
            self.y = 0.0;
            self.vel_y = 0.0;
        }

        self.tilt = tilt_for_velocity(self.vel_y);
    }

    /// Flap: replace the current velocity (not additive)
    pub fn apply_impulse(&mut self, power: f32) {
        self.vel_y = power;
    }

    /// Bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.size
    }

    /// Bounding box for collision tests
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, self.y),
            Vec2::new(self.x + self.size, self.y + self.size),
        )
    }
}

/// Nose up when rising, nose down when falling
#[inline]
pub fn tilt_for_velocity(vel_y: f32) -> f32 {
    (vel_y * TILT_GAIN).clamp(TILT_MIN, TILT_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gravity_integration() {
        let mut actor = Actor::new(100.0, 60.0);
        actor.y = 320.0;

        actor.advance(0.25, 1.0);
        assert_eq!(actor.vel_y, 0.25);
        assert_eq!(actor.y, 320.25);

        actor.advance(0.25, 1.0);
        assert_eq!(actor.vel_y, 0.5);
        assert_eq!(actor.y, 320.75);
    }

    #[test]
    fn test_impulse_overwrites_velocity() {
        let mut actor = Actor::new(100.0, 60.0);
        actor.vel_y = 12.0;
        actor.apply_impulse(-6.0);
        assert_eq!(actor.vel_y, -6.0);

        actor.apply_impulse(-6.0);
        assert_eq!(actor.vel_y, -6.0, "flaps do not stack");
    }

    #[test]
    fn test_ceiling_clamp() {
        let mut actor = Actor::new(100.0, 60.0);
        actor.y = 2.0;
        actor.apply_impulse(-6.0);
        actor.advance(0.25, 1.0);

        assert_eq!(actor.y, 0.0);
        assert_eq!(actor.vel_y, 0.0);
        assert_eq!(actor.tilt, 0.0);
    }

    #[test]
    fn test_tilt_limits() {
        assert_eq!(tilt_for_velocity(-6.0), -18.0);
        assert_eq!(tilt_for_velocity(-20.0), TILT_MIN);
        assert_eq!(tilt_for_velocity(50.0), TILT_MAX);
        assert_eq!(tilt_for_velocity(0.0), 0.0);
    }

    #[test]
    fn test_recenter() {
        let mut actor = Actor::new(100.0, 60.0);
        actor.y = 12.0;
        actor.vel_y = 4.0;
        actor.tilt = 12.0;

        actor.recenter(640.0);
        assert_eq!(actor.y, 320.0);
        assert_eq!(actor.vel_y, 0.0);
        assert_eq!(actor.tilt, 0.0);
        assert_eq!(actor.x(), 100.0);
    }

    proptest! {
        #[test]
        fn prop_actor_never_above_ceiling(
            start_y in 0.0f32..640.0,
            start_vel in -50.0f32..50.0,
            gravity in -2.0f32..2.0,
            steps in 1usize..200,
        ) {
            let mut actor = Actor::new(100.0, 60.0);
            actor.y = start_y;
            actor.vel_y = start_vel;
            for _ in 0..steps {
                actor.advance(gravity, 1.0);
                prop_assert!(actor.y >= 0.0);
                prop_assert!(actor.tilt >= TILT_MIN && actor.tilt <= TILT_MAX);
            }
        }
    }
}
