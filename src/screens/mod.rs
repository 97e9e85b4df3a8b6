//! Screen-level glue: layout, button handling, and composition
//!
//! A screen owns the state its window needs between redraws and translates
//! provider/tracker state into drawable geometry. The host owns the actual
//! windows and pushes button events and draw calls down here.

pub mod calibration;
pub mod compass;

pub use calibration::CalibrationScreen;
pub use compass::{CompassLayout, CompassScreen};

/// Physical buttons of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Up,
    Select,
    Down,
    Back,
}

/// Whether a screen consumed a button press.
///
/// `Ignored` lets the host apply its default behavior, e.g. popping the
/// window off the stack for `Back`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonOutcome {
    Handled,
    Ignored,
}
