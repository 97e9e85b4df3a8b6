//! Flat/upright orientation detection and the layout transition animation
//!
//! The accelerometer is heavily low-pass filtered before classification; the
//! two thresholds form a dead band so the layout does not flip back and forth
//! while the wearer holds the device near the boundary. Each confirmed change
//! restarts an eased animation of the transition factor, which the layout
//! code uses to blend between the rose and band arrangements.

use nalgebra::Vector3;

use crate::angle::blend;
use crate::types::{AccelSample, Orientation, OrientationSettings};

/// Piecewise cubic ease-in-out over normalized time `p` in `[0, 1]`.
///
/// `4p^3` for the first half, `0.5 * (2p - 2)^3 + 1` for the second. The
/// exact curve matters: the motion feel of the rose/band transition was tuned
/// against it.
pub fn ease_in_out_cubic(p: f32) -> f32 {
    if p < 0.5 {
        4.0 * p * p * p
    } else {
        let f = 2.0 * p - 2.0;
        0.5 * f * f * f + 1.0
    }
}

/// An in-flight eased animation of the transition factor.
///
/// Captures the factor's value at (re)start and eases toward the target over
/// a fixed duration, so an interrupted transition continues smoothly from
/// wherever it was.
#[derive(Debug, Clone, Copy)]
pub struct TransitionAnimation {
    start_value: f32,
    target_value: f32,
    duration_ms: u32,
    elapsed_ms: u32,
    active: bool,
}

impl TransitionAnimation {
    /// An inactive animation.
    pub fn idle(duration_ms: u32) -> Self {
        Self {
            start_value: 0.0,
            target_value: 0.0,
            duration_ms,
            elapsed_ms: 0,
            active: false,
        }
    }

    /// (Re)start the animation from `start` toward `target`.
    pub fn restart(&mut self, start: f32, target: f32) {
        self.start_value = start;
        self.target_value = target;
        self.elapsed_ms = 0;
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn target_value(&self) -> f32 {
        self.target_value
    }

    /// Advance by `dt_ms` and return the new eased value, or `None` when no
    /// animation is in flight. Clamps to the target and deactivates when the
    /// duration is reached.
    pub fn advance(&mut self, dt_ms: u32) -> Option<f32> {
        if !self.active {
            return None;
        }

        self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
        let p = self.elapsed_ms as f32 / self.duration_ms as f32;
        let value = blend(self.start_value, self.target_value, ease_in_out_cubic(p));

        if self.elapsed_ms >= self.duration_ms {
            self.active = false;
        }
        Some(value)
    }
}

/// Hysteresis-based flat/upright detector with a damped transition factor.
#[derive(Debug, Clone, Copy)]
pub struct OrientationTracker {
    settings: OrientationSettings,
    orientation: Orientation,
    transition_factor: f32,
    damped_accel: AccelSample,
    animation: TransitionAnimation,
}

impl OrientationTracker {
    pub fn new(settings: OrientationSettings) -> Self {
        Self {
            settings,
            orientation: Orientation::default(),
            transition_factor: 0.0,
            damped_accel: AccelSample::default(),
            animation: TransitionAnimation::idle(settings.transition_duration_ms),
        }
    }

    /// Fold a new accelerometer sample into the damped average and classify.
    ///
    /// Returns the desired orientation when the damped Y axis is outside the
    /// dead band; `None` means "hold the previous state". The caller decides
    /// whether the classification is actually a change (see
    /// [`OrientationTracker::set_orientation`]).
    pub fn feed_accel(&mut self, sample: AccelSample) -> Option<Orientation> {
        let f = self.settings.accel_damping;
        self.damped_accel = AccelSample {
            vector: sample.vector * f + self.damped_accel.vector * (1.0 - f),
            did_vibrate: sample.did_vibrate,
            timestamp_ms: sample.timestamp_ms,
        };

        let y = self.damped_accel.vector.y;
        if y < self.settings.upright_threshold {
            Some(Orientation::Upright)
        } else if y > self.settings.flat_threshold {
            Some(Orientation::Flat)
        } else {
            None
        }
    }

    /// Switch orientation, restarting the transition animation from the
    /// current factor. No-op (returns `false`) when unchanged.
    pub fn set_orientation(&mut self, orientation: Orientation) -> bool {
        if self.orientation == orientation {
            return false;
        }

        self.orientation = orientation;
        let target = match orientation {
            Orientation::Upright => 1.0,
            Orientation::Flat => 0.0,
        };
        self.animation.restart(self.transition_factor, target);
        true
    }

    /// Advance the in-flight transition animation, if any, and return the
    /// updated factor.
    pub fn advance_animation(&mut self, dt_ms: u32) -> Option<f32> {
        let value = self.animation.advance(dt_ms)?;
        self.transition_factor = value;
        Some(value)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn transition_factor(&self) -> f32 {
        self.transition_factor
    }

    /// Force the transition factor, for debugging layout blends.
    pub fn set_transition_factor(&mut self, factor: f32) {
        self.transition_factor = factor.clamp(0.0, 1.0);
    }

    /// The exponentially smoothed accelerometer data.
    pub fn damped_accel(&self) -> AccelSample {
        self.damped_accel
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_active()
    }
}
