//! Calibration screen
//!
//! Wraps the [`CalibrationTracker`] for display: the prompt text at the top,
//! the coverage ring below it, and a demo mode that walks a fake heading
//! around the ring so the rendering states can be exercised without a sensor.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_9X15_BOLD};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Alignment, Text};

use crate::angle::{Angle, FULL_TURN};
use crate::calibration::{CalibrationHint, CalibrationTracker};
use crate::render::{RING_THICKNESS, draw_calibration_ring};
use crate::screens::{Button, ButtonOutcome};

const TEXT_BLOCK_HEIGHT: i32 = 50;
/// Heading advance per demo step, one degree plus a few raw units so the dot
/// creeps around the ring without ever retracing the exact same angles.
const DEMO_ANGLE_STEP: Angle = 15 + FULL_TURN / 360;
const DEMO_INTENSITY_STEP: u16 = 3;

/// Display state for the calibration window.
pub struct CalibrationScreen {
    tracker: CalibrationTracker,
    displayed_hint: Option<CalibrationHint>,
    demo_angle: Angle,
    demo_intensity: u16,
}

impl CalibrationScreen {
    pub fn new() -> Self {
        Self {
            tracker: CalibrationTracker::new(),
            displayed_hint: None,
            demo_angle: 0,
            demo_intensity: 0,
        }
    }

    /// A screen whose ring already shows the three fill states.
    pub fn with_demo_pattern() -> Self {
        let mut screen = Self::new();
        screen.tracker.seed_demo_pattern();
        screen
    }

    pub fn tracker(&self) -> &CalibrationTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut CalibrationTracker {
        &mut self.tracker
    }

    /// The hint, but only when it differs from the one last returned; the
    /// host re-lays-out its text layers only on an actual change.
    pub fn hint_if_changed(&mut self) -> Option<CalibrationHint> {
        let hint = self.tracker.hint();
        if self.displayed_hint == Some(hint) {
            return None;
        }
        self.displayed_hint = Some(hint);
        Some(hint)
    }

    /// Advance the demo animation by one frame: a fake heading sweeping
    /// around the ring with slowly rising intensity.
    pub fn demo_step(&mut self) {
        self.demo_angle += DEMO_ANGLE_STEP;
        self.demo_intensity = self.demo_intensity.wrapping_add(DEMO_INTENSITY_STEP);

        let intensity = (self.demo_intensity / 5).min(255) as u8;
        self.tracker.merge_value(self.demo_angle, intensity);
        self.tracker.set_current_angle(self.demo_angle);
    }

    /// The calibration window swallows Back so an accidental press does not
    /// abort an unfinished calibration; everything else falls through.
    pub fn handle_button(&mut self, button: Button) -> ButtonOutcome {
        match button {
            Button::Back => ButtonOutcome::Handled,
            _ => ButtonOutcome::Ignored,
        }
    }

    /// Render the prompt text and the coverage ring.
    pub fn draw<D>(&self, target: &mut D, bounds: Rectangle, color: D::Color) -> Result<(), D::Error>
    where
        D: DrawTarget,
    {
        let hint = self.tracker.hint();
        let center_x = bounds.center().x;

        let headline_style = MonoTextStyle::new(&FONT_9X15_BOLD, color);
        Text::with_alignment(
            hint.headline(),
            Point::new(center_x, bounds.top_left.y + 14),
            headline_style,
            Alignment::Center,
        )
        .draw(target)?;

        let body_style = MonoTextStyle::new(&FONT_6X10, color);
        Text::with_alignment(
            hint.description(),
            Point::new(center_x, bounds.top_left.y + 30),
            body_style,
            Alignment::Center,
        )
        .draw(target)?;

        let ring_top = bounds.top_left.y + TEXT_BLOCK_HEIGHT;
        let ring_height = bounds.size.height as i32 - TEXT_BLOCK_HEIGHT;
        let ring_side = ring_height.min(bounds.size.width as i32) - RING_THICKNESS;
        let ring_bounds = Rectangle::new(
            Point::new(center_x - ring_side / 2, ring_top + (ring_height - ring_side) / 2),
            Size::new(ring_side as u32, ring_side as u32),
        );
        draw_calibration_ring(target, ring_bounds, &self.tracker, color)?;

        Ok(())
    }
}

impl Default for CalibrationScreen {
    fn default() -> Self {
        Self::new()
    }
}
