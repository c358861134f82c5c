//! Oscillating launch angle
//!
//! The angle sweeps back and forth between the bounds at a fixed angular
//! speed; the player only chooses *when* to fire.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Side;
use crate::consts::*;
use crate::radial_point;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AimOscillator {
    /// Degrees from the downward axis, toward the opponent
    pub angle: f32,
    /// +1 sweeping up toward `AIM_MAX_DEG`, -1 sweeping back
    pub direction: f32,
    /// Degrees per second
    pub speed: f32,
}

impl AimOscillator {
    pub fn new(speed: f32) -> Self {
        Self {
            angle: AIM_MIN_DEG,
            direction: 1.0,
            speed,
        }
    }

    /// Advance one frame, reflecting at the bounds
    pub fn step(&mut self, dt: f32) {
        self.angle += self.speed * self.direction * dt;
        if self.angle > AIM_MAX_DEG {
            self.angle = AIM_MAX_DEG;
            self.direction = -1.0;
        } else if self.angle < AIM_MIN_DEG {
            self.angle = AIM_MIN_DEG;
            self.direction = 1.0;
        }
    }

    /// Launch position and velocity for `side` at the current angle
    pub fn launch(&self, side: Side) -> (Vec2, Vec2) {
        let mirror = side.mirrored();
        let pos = radial_point(side.base_center(), LAUNCH_RADIUS, self.angle, mirror);
        let dir = radial_point(Vec2::ZERO, 1.0, self.angle, mirror);
        (pos, dir * LAUNCH_SPEED)
    }
}
