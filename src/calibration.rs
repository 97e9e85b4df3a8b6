//! Calibration coverage tracking for the compass sensor
//!
//! While the compass reports itself uncalibrated, the wearer is asked to roll
//! the device around. Each accelerometer sample is turned into a fake heading
//! plus a confidence value, and the ring of [`SEGMENT_COUNT`] angular
//! segments records the best confidence seen per direction. The textual hint
//! walks the user from the initial prompt to "tilt more" to done; magnetic
//! interference freezes progress and, once it clears, restarts the ring from
//! scratch.

use nalgebra::{ComplexField, RealField, Vector3};

use crate::angle::{self, Angle, FULL_TURN, QUARTER_TURN};

/// Number of angular segments in the calibration ring.
pub const SEGMENT_COUNT: usize = 80;

/// A segment counts as visited at this intensity.
pub const THRESHOLD_VISITED: u8 = 10;
/// A segment fills to the mid radius at this intensity.
pub const THRESHOLD_MID: u8 = 100;
/// A segment fills the whole ring thickness at this intensity.
pub const THRESHOLD_FILLED: u8 = 150;

/// Which prompt the calibration screen should currently show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationHint {
    /// Magnetic interference suppresses calibration progress
    Interference,
    /// Not every segment has been visited yet
    Initial,
    /// Every segment visited, but some below the filled threshold
    TiltMore,
    /// The whole ring is filled
    Filled,
}

impl CalibrationHint {
    pub fn headline(self) -> &'static str {
        match self {
            CalibrationHint::Interference => "Interference",
            CalibrationHint::Initial => "Calibration",
            CalibrationHint::TiltMore => "Tilt more!",
            CalibrationHint::Filled => "More!",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CalibrationHint::Interference => "Move away from\nmagnetic objects",
            CalibrationHint::Initial => "Tilt watch to\nroll ball around",
            CalibrationHint::TiltMore => "Fill the ring\ncompletely",
            CalibrationHint::Filled => "Try a fancy dance?",
        }
    }
}

/// Render-facing classification of a single segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentFlags {
    pub visited: bool,
    pub mid: bool,
    pub filled: bool,
}

/// Per-segment "max intensity observed" tracker with interference handling.
#[derive(Debug, Clone)]
pub struct CalibrationTracker {
    segments: [u8; SEGMENT_COUNT],
    current_angle: Angle,
    interference: bool,
    hint: CalibrationHint,
}

impl CalibrationTracker {
    /// A fresh tracker with all segments zeroed.
    pub fn new() -> Self {
        Self {
            segments: [0; SEGMENT_COUNT],
            current_angle: 20 * FULL_TURN / 360,
            interference: false,
            hint: CalibrationHint::Initial,
        }
    }

    /// Seed a few segments, useful to demo the ring rendering states.
    pub fn seed_demo_pattern(&mut self) {
        let base = SEGMENT_COUNT * 6 / 10;
        self.segments[base] = THRESHOLD_VISITED;
        self.segments[base + 1] = THRESHOLD_MID;
        self.segments[base + 2] = THRESHOLD_FILLED;
    }

    /// Map an angle to its segment index.
    pub fn segment_index(angle: Angle) -> usize {
        (angle::wrap(angle) as usize * SEGMENT_COUNT / FULL_TURN as usize) % SEGMENT_COUNT
    }

    /// Merge an observed intensity into the segment covering `angle`,
    /// keeping the maximum. Returns whether the stored value rose (i.e. the
    /// ring needs a redraw). Ignored entirely while interference is active.
    pub fn merge_value(&mut self, angle: Angle, intensity: u8) -> bool {
        if self.interference {
            return false;
        }

        let segment = Self::segment_index(angle);
        let raised = self.segments[segment] < intensity;
        if raised {
            self.segments[segment] = intensity;
        }
        self.refresh_hint();
        raised
    }

    /// Move the live indicator dot.
    pub fn set_current_angle(&mut self, angle: Angle) {
        self.current_angle = angle;
    }

    pub fn current_angle(&self) -> Angle {
        self.current_angle
    }

    /// Derive a heading and confidence from an accelerometer sample and merge
    /// them: heading from the gravity direction in the device's plane,
    /// confidence falling off with |z| (a device lying flat tells us nothing
    /// about its bearing).
    pub fn apply_accel_data(&mut self, accel: Vector3<f32>) {
        let heading = angle::from_radians(accel.y.atan2(accel.x)) + QUARTER_TURN;
        let damped_z = accel.z.abs() / 5.0;
        let intensity = 255 - if damped_z > 255.0 { 255 } else { damped_z as u8 };

        self.set_current_angle(heading);
        self.merge_value(heading, intensity);
    }

    /// Toggle the interference state. Leaving interference resets every
    /// segment to zero so calibration starts fresh; while active, merges are
    /// frozen. No-op when the state is unchanged.
    pub fn set_interference(&mut self, interference: bool) {
        if self.interference == interference {
            return;
        }

        if self.interference && !interference {
            self.segments = [0; SEGMENT_COUNT];
        }
        self.interference = interference;
        self.refresh_hint();
    }

    pub fn is_influenced_by_interference(&self) -> bool {
        self.interference
    }

    /// The currently applicable prompt.
    pub fn hint(&self) -> CalibrationHint {
        self.hint
    }

    pub fn segment_value(&self, index: usize) -> u8 {
        self.segments[index]
    }

    pub fn segment_flags(&self, index: usize) -> SegmentFlags {
        let value = self.segments[index];
        SegmentFlags {
            visited: value >= THRESHOLD_VISITED,
            mid: value >= THRESHOLD_MID,
            filled: value >= THRESHOLD_FILLED,
        }
    }

    fn refresh_hint(&mut self) {
        self.hint = self.classify();
    }

    fn classify(&self) -> CalibrationHint {
        if self.interference {
            return CalibrationHint::Interference;
        }

        let mut all_filled = true;
        for &value in &self.segments {
            if value < THRESHOLD_VISITED {
                return CalibrationHint::Initial;
            }
            if value < THRESHOLD_FILLED {
                all_filled = false;
            }
        }

        if all_filled {
            CalibrationHint::Filled
        } else {
            CalibrationHint::TiltMore
        }
    }
}

impl Default for CalibrationTracker {
    fn default() -> Self {
        Self::new()
    }
}
