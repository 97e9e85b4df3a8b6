//! The data provider: sensor fan-in, simulation ticks, and event fan-out
//!
//! One provider lives for the lifetime of the compass screen. It owns the
//! rotational smoothing simulator and the orientation state machine, receives
//! sensor callbacks and timer expiries from the host event loop, and
//! distributes results through the optional methods of
//! [`DataProviderObserver`].
//!
//! The host side of the contract: whenever
//! [`DataProviderObserver::schedule_tick`] is called, arm a one-shot timer
//! and call [`DataProvider::tick`] when it fires; cancel any armed timer when
//! the provider is dropped. At most one tick is requested at a time.

use log::debug;
use nalgebra::Vector3;

use crate::angle::Angle;
use crate::orientation::OrientationTracker;
use crate::simulator::RotationSimulator;
use crate::types::{AccelSample, CompassStatus, Orientation, ProviderSettings};

/// Nominal delay between simulation ticks (~30 Hz).
pub const TICK_INTERVAL_MS: u32 = 1000 / 30;

/// Capability-based event sink for the data provider.
///
/// Every method has a default no-op (or identity) implementation: an observer
/// implements only the callbacks it cares about, mirroring the original
/// nullable handler table. The `modify_*` hooks run inside the tick and may
/// adjust the commanded angle or the spring coefficients on the fly.
pub trait DataProviderObserver {
    /// Arm a one-shot timer that calls [`DataProvider::tick`] after
    /// `delay_ms` milliseconds.
    fn schedule_tick(&mut self, _delay_ms: u32) {}

    /// The animated presentation angle advanced by one tick.
    fn presentation_angle_changed(&mut self, _angle: Angle) {}

    /// The damped accelerometer average absorbed a new sample.
    fn damped_accel_changed(&mut self, _accel: Vector3<f32>) {}

    /// The flat/upright classification changed.
    fn orientation_changed(&mut self, _orientation: Orientation) {}

    /// The rose/band transition factor moved (fires on every animation frame).
    fn transition_factor_changed(&mut self, _factor: f32) {}

    /// Magnetic interference started or cleared.
    fn interference_changed(&mut self, _interference: bool) {}

    /// Adjust a commanded heading before it becomes the target.
    fn modify_target_angle(&mut self, angle: Angle) -> Angle {
        angle
    }

    /// Adjust the spring stiffness for the current tick.
    fn modify_attraction(&mut self, attraction: f32) -> f32 {
        attraction
    }

    /// Adjust the velocity decay for the current tick.
    fn modify_friction(&mut self, friction: f32) -> f32 {
        friction
    }
}

/// Facade over the smoothing simulator and the orientation state machine.
pub struct DataProvider<O: DataProviderObserver> {
    observer: O,
    settings: ProviderSettings,
    simulator: RotationSimulator,
    orientation: OrientationTracker,
    interference: bool,
    needs_calibration: bool,
    tick_pending: bool,
    was_at_rest: bool,
}

impl<O: DataProviderObserver> DataProvider<O> {
    /// Create a provider with default settings.
    pub fn new(observer: O) -> Self {
        Self::with_settings(observer, ProviderSettings::default())
    }

    pub fn with_settings(observer: O, settings: ProviderSettings) -> Self {
        Self {
            observer,
            settings,
            simulator: RotationSimulator::new(settings.friction, settings.attraction),
            orientation: OrientationTracker::new(settings.orientation),
            interference: false,
            needs_calibration: true,
            tick_pending: false,
            was_at_rest: true,
        }
    }

    /// Command a new heading, running it through the target-angle modifier
    /// hook, and make sure a simulation tick is scheduled.
    pub fn set_target_angle(&mut self, angle: Angle) {
        let angle = self.observer.modify_target_angle(angle);
        self.simulator.set_target_angle(angle);
        self.ensure_tick_scheduled();
    }

    pub fn target_angle(&self) -> Angle {
        self.simulator.target_angle()
    }

    /// Offset the current target, e.g. from a button press.
    pub fn delta_target_angle(&mut self, delta: Angle) {
        let target = self.simulator.target_angle();
        self.set_target_angle(target + delta);
    }

    pub fn presentation_angle(&self) -> Angle {
        self.simulator.presentation_angle()
    }

    /// Jump the rendered angle without animation.
    pub fn set_presentation_angle(&mut self, angle: Angle) {
        self.simulator.set_presentation_angle(angle);
    }

    /// Run one simulation tick. Called by the host when the armed timer
    /// fires.
    ///
    /// The tick always reschedules itself, whether or not the needle has
    /// converged. Continuous sensor input would immediately wake the
    /// simulation again anyway; the battery cost of the idle ticks is a
    /// deliberate tradeoff.
    pub fn tick(&mut self) {
        self.tick_pending = false;

        let attraction = self.observer.modify_attraction(self.settings.attraction);
        let friction = self.observer.modify_friction(self.settings.friction);
        self.simulator.step_with(attraction, friction);

        let at_rest = self.simulator.is_at_rest();
        if at_rest && !self.was_at_rest {
            debug!("needle rested at {}", self.simulator.presentation_angle());
        }
        self.was_at_rest = at_rest;

        if let Some(factor) = self.orientation.advance_animation(TICK_INTERVAL_MS) {
            self.observer.transition_factor_changed(factor);
        }
        self.observer.presentation_angle_changed(self.simulator.presentation_angle());

        self.ensure_tick_scheduled();
    }

    /// Feed one accelerometer sample: damp it, report the new average, and
    /// run the flat/upright classification.
    pub fn handle_accel_sample(&mut self, sample: AccelSample) {
        let desired = self.orientation.feed_accel(sample);
        self.observer.damped_accel_changed(self.orientation.damped_accel().vector);

        if let Some(orientation) = desired {
            self.set_orientation(orientation);
        }
    }

    /// Feed one heading sample with its calibration validity.
    ///
    /// Invalid data flags magnetic interference and is not used as a target;
    /// any other status drives the needle.
    pub fn handle_compass_heading(&mut self, heading: Angle, status: CompassStatus) {
        let interference = status == CompassStatus::DataInvalid;
        if interference != self.interference {
            self.interference = interference;
            debug!("magnetic interference: {}", interference);
            self.observer.interference_changed(interference);
        }

        self.needs_calibration = status != CompassStatus::Calibrated;
        if !interference {
            self.set_target_angle(heading);
        }
    }

    /// Switch the flat/upright orientation, restarting the transition-factor
    /// animation. No-op when unchanged.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.orientation.set_orientation(orientation) {
            self.observer.orientation_changed(orientation);
            self.ensure_tick_scheduled();
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation.orientation()
    }

    pub fn transition_factor(&self) -> f32 {
        self.orientation.transition_factor()
    }

    /// Force the transition factor, for debugging layout blends.
    pub fn set_transition_factor(&mut self, factor: f32) {
        self.orientation.set_transition_factor(factor);
        self.observer.transition_factor_changed(self.orientation.transition_factor());
    }

    /// The exponentially smoothed accelerometer data.
    pub fn damped_accel(&self) -> AccelSample {
        self.orientation.damped_accel()
    }

    /// Whether the calibration screen should be shown.
    pub fn needs_calibration(&self) -> bool {
        self.needs_calibration
    }

    pub fn is_influenced_by_magnetic_interference(&self) -> bool {
        self.interference
    }

    /// Whether a tick request is outstanding.
    pub fn is_tick_pending(&self) -> bool {
        self.tick_pending
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    fn ensure_tick_scheduled(&mut self) {
        if !self.tick_pending {
            self.tick_pending = true;
            self.observer.schedule_tick(TICK_INTERVAL_MS);
        }
    }
}
