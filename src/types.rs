//! Core types and settings for the compass face

use nalgebra::Vector3;

/// A single accelerometer sample in raw device units (roughly milli-g).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelSample {
    /// Acceleration vector (x, y, z) in raw units
    pub vector: Vector3<f32>,
    /// Whether the device vibrated while the sample was captured
    pub did_vibrate: bool,
    /// Sample timestamp in milliseconds
    pub timestamp_ms: u64,
}

impl AccelSample {
    /// Convenience constructor for a sample without vibration metadata.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            vector: Vector3::new(x, y, z),
            did_vibrate: false,
            timestamp_ms: 0,
        }
    }
}

impl Default for AccelSample {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

/// Calibration validity reported by the host's heading service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompassStatus {
    /// Heading data is unusable, typically due to magnetic interference
    DataInvalid,
    /// Heading data is usable but the sensor is still calibrating
    Calibrating,
    /// Heading data is fully calibrated
    Calibrated,
}

/// How the wearer is holding the device.
///
/// `Flat` shows the polar compass rose, `Upright` the linear band. The
/// classifier in [`crate::OrientationTracker`] switches between the two with
/// hysteresis so the layout does not chatter near the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Device lying flat, face up
    #[default]
    Flat,
    /// Device held upright, face toward the wearer
    Upright,
}

/// Settings for the orientation state machine
///
/// The thresholds are on the damped accelerometer Y axis in raw units. Both
/// are negative because gravity pulls Y negative as the device tilts upright.
/// `upright_threshold` must be below `flat_threshold`; readings between the
/// two keep the previous classification.
#[derive(Debug, Clone, Copy)]
pub struct OrientationSettings {
    /// Exponential moving average weight of each new accelerometer sample
    pub accel_damping: f32,
    /// Enter `Upright` when damped Y falls below this value
    pub upright_threshold: f32,
    /// Enter `Flat` when damped Y rises above this value
    pub flat_threshold: f32,
    /// Duration of the eased transition-factor animation in milliseconds
    pub transition_duration_ms: u32,
}

impl Default for OrientationSettings {
    fn default() -> Self {
        Self {
            accel_damping: 0.3,
            upright_threshold: -700.0,
            flat_threshold: -500.0,
            transition_duration_ms: 360,
        }
    }
}

/// Settings for the data provider and its rotational smoothing simulation
///
/// # Example
/// ```
/// use compass_face::{DataProvider, DataProviderObserver, ProviderSettings};
///
/// struct Handlers;
/// impl DataProviderObserver for Handlers {}
///
/// let settings = ProviderSettings {
///     attraction: 0.05, // softer spring
///     ..Default::default()
/// };
/// let provider = DataProvider::with_settings(Handlers, settings);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ProviderSettings {
    /// Velocity decay per simulation tick, in `(0, 1)`
    pub friction: f32,
    /// Spring stiffness toward the target angle per tick, in `(0, 1)`
    pub attraction: f32,
    /// Orientation state machine settings
    pub orientation: OrientationSettings,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            friction: 0.9,
            attraction: 0.1,
            orientation: OrientationSettings::default(),
        }
    }
}
