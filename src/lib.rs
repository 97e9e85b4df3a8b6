#![no_std]

//! Compass Face - the platform-independent core of a compass watchface
//!
//! This is a Rust port of a C application written against a wrist-worn
//! device's windowing toolkit. The toolkit itself (window stack, layer tree,
//! timers, sensor services) stays on the host side; this crate contains the
//! state machines and rendering routines that made the watchface tick:
//!
//! - A spring-damper simulation that turns noisy, wrapping compass headings
//!   into a critically damped needle animation
//! - A flat/upright orientation classifier with hysteresis, driving an eased
//!   0..1 transition factor that blends the "rose" and "band" layouts
//! - A calibration coverage tracker that records per-segment intensity and
//!   prompts the user until the ring is filled
//! - Rendering layers (compass rose, needle, calibration ring) generic over
//!   any [`embedded_graphics::draw_target::DrawTarget`]
//!
//! The host event loop drives everything: sensor samples and timer expiries
//! are fed in through plain method calls, and outputs fan out through the
//! optional callbacks of [`DataProviderObserver`]. No locks, no allocation,
//! `#![no_std]` compatible.
//!
//! # Quick Start
//!
//! ```rust
//! use compass_face::{angle, Angle, DataProvider, DataProviderObserver};
//!
//! struct Handlers;
//!
//! impl DataProviderObserver for Handlers {
//!     fn presentation_angle_changed(&mut self, _angle: Angle) {
//!         // mark the needle layer dirty
//!     }
//! }
//!
//! let mut provider = DataProvider::new(Handlers);
//! provider.set_target_angle(angle::from_degrees(45));
//!
//! // host timer fires at ~30 Hz
//! provider.tick();
//! provider.tick();
//!
//! assert_ne!(provider.presentation_angle(), 0);
//! ```

pub mod angle;
pub mod bitmap;
pub mod calibration;
mod orientation;
mod provider;
pub mod render;
pub mod screens;
mod simulator;
mod types;

pub use angle::Angle;
pub use calibration::{CalibrationHint, CalibrationTracker, SegmentFlags};
pub use orientation::{OrientationTracker, TransitionAnimation, ease_in_out_cubic};
pub use provider::{DataProvider, DataProviderObserver, TICK_INTERVAL_MS};
pub use screens::{Button, ButtonOutcome, CalibrationScreen, CompassScreen};
pub use simulator::RotationSimulator;
pub use types::{AccelSample, CompassStatus, Orientation, OrientationSettings, ProviderSettings};
