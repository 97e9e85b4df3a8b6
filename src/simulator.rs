//! Rotational smoothing simulation for the compass needle
//!
//! A small discrete-time spring-damper: every tick the presentation angle
//! advances by the angular velocity, the velocity is pulled toward the target
//! by an attraction force proportional to the remaining (shortest-path)
//! distance, and friction bleeds energy out. The default coefficients are
//! underdamped: the needle swings a little past a new heading and settles
//! back, which reads as momentum rather than error on the dial.

use crate::angle::{self, Angle};

/// Spring-damper simulation state for a single rotating element.
///
/// The simulator is a pure state machine; scheduling of ticks is the
/// responsibility of [`crate::DataProvider`].
#[derive(Debug, Clone, Copy)]
pub struct RotationSimulator {
    /// Last commanded heading
    target_angle: Angle,
    /// Currently rendered heading, converges toward the target
    presentation_angle: Angle,
    /// Signed rotational speed in angle units per tick
    angular_velocity: i32,
    /// Velocity decay per tick, in `(0, 1)`
    friction: f32,
    /// Spring stiffness toward the target per tick, in `(0, 1)`
    attraction: f32,
}

impl RotationSimulator {
    /// Create a simulator at rest at angle 0 with the given coefficients.
    pub fn new(friction: f32, attraction: f32) -> Self {
        debug_assert!(friction > 0.0 && friction < 1.0);
        debug_assert!(attraction > 0.0 && attraction < 1.0);
        Self {
            target_angle: 0,
            presentation_angle: 0,
            angular_velocity: 0,
            friction,
            attraction,
        }
    }

    /// Record a new commanded heading.
    ///
    /// Setting the target multiple times within one tick window is fine; only
    /// the latest value is used when the tick runs.
    pub fn set_target_angle(&mut self, angle: Angle) {
        self.target_angle = angle;
    }

    pub fn target_angle(&self) -> Angle {
        self.target_angle
    }

    /// Force the rendered angle, e.g. to jump without animation.
    pub fn set_presentation_angle(&mut self, angle: Angle) {
        self.presentation_angle = angle;
    }

    pub fn presentation_angle(&self) -> Angle {
        self.presentation_angle
    }

    pub fn angular_velocity(&self) -> i32 {
        self.angular_velocity
    }

    /// Advance the simulation by one tick using the stored coefficients.
    pub fn step(&mut self) {
        let (attraction, friction) = (self.attraction, self.friction);
        self.step_with(attraction, friction);
    }

    /// Advance the simulation by one tick with explicit coefficients.
    ///
    /// The coefficients are parameters rather than state so that per-tick
    /// modifier hooks can adjust stiffness, e.g. stiffer while the wearer is
    /// actively turning.
    pub fn step_with(&mut self, attraction: f32, friction: f32) {
        self.presentation_angle += self.angular_velocity;

        let distance = angle::shortest_delta(self.target_angle, self.presentation_angle);
        let force = (distance as f32 * attraction) as i32;
        self.angular_velocity += force;
        self.angular_velocity = (self.angular_velocity as f32 * friction) as i32;
    }

    /// Whether the needle has come to rest on its target.
    ///
    /// True when the velocity is zero and the remaining attraction force
    /// truncates to zero, i.e. a further tick would not move anything.
    pub fn is_at_rest(&self) -> bool {
        let distance = angle::shortest_delta(self.target_angle, self.presentation_angle);
        self.angular_velocity == 0 && (distance as f32 * self.attraction) as i32 == 0
    }
}

impl Default for RotationSimulator {
    fn default() -> Self {
        Self::new(0.9, 0.1)
    }
}
