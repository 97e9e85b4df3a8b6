//! The main compass screen
//!
//! Shows the rotating rose with the numeric heading, the cardinal direction
//! label, and the fixed pointer. Every element has two layout rectangles, one
//! for the polar "rose" arrangement and one for the linear "band"; the
//! transition factor blends between them so the layout slides rather than
//! snaps when the wearer raises the device.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Alignment, Text};
use heapless::String;

use crate::angle::{self, Angle, FULL_TURN, rect_blend};
use crate::orientation::TransitionAnimation;
use crate::provider::{DataProvider, DataProviderObserver};
use crate::render::draw_rose;
use crate::screens::{Button, ButtonOutcome};

const TEXT_HEIGHT_ROSE: i32 = 24;
const TEXT_HEIGHT_BAND: i32 = 55;
const DIRECTION_WIDTH: i32 = 40;
const DIRECTION_MARGIN_BAND: i32 = 40;
const ANGLE_WIDTH_ROSE: i32 = 40;
const ANGLE_WIDTH_BAND: i32 = 65;
const POINTER_WIDTH: u32 = 3;

const DIRECTIONS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Resolved geometry and text for one frame of the compass screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CompassLayout {
    /// Rotation to apply to the tick rose
    pub rose_angle: Angle,
    /// Numeric heading, e.g. `"134°"`
    pub angle_text: String<8>,
    pub angle_rect: Rectangle,
    /// Cardinal direction label, e.g. `"SE"`
    pub direction_text: &'static str,
    pub direction_rect: Rectangle,
    pub pointer_rect: Rectangle,
}

/// Layout state of the compass screen.
pub struct CompassScreen {
    rose_frame: Rectangle,
    direction_rect_rose: Rectangle,
    direction_rect_band: Rectangle,
    angle_rect_rose: Rectangle,
    angle_rect_band: Rectangle,
    pointer_rect_rose: Rectangle,
    pointer_rect_band: Rectangle,
    shows_band: bool,
    transition_factor: f32,
    band_animation: TransitionAnimation,
}

impl CompassScreen {
    /// Lay out the screen inside the window bounds.
    pub fn new(bounds: Rectangle) -> Self {
        // every rectangle is anchored at the window origin so the text layers
        // and the rose stay attached wherever the window sits
        let origin = bounds.top_left;
        let width = bounds.size.width as i32;
        let height = bounds.size.height as i32;

        let direction_rect_rose = Rectangle::new(
            origin + Point::new(width - DIRECTION_WIDTH, height - TEXT_HEIGHT_ROSE),
            Size::new(DIRECTION_WIDTH as u32, TEXT_HEIGHT_ROSE as u32),
        );
        let direction_rect_band = Rectangle::new(
            origin
                + Point::new(
                    width - DIRECTION_WIDTH - DIRECTION_MARGIN_BAND,
                    height - TEXT_HEIGHT_BAND,
                ),
            Size::new(DIRECTION_WIDTH as u32, TEXT_HEIGHT_ROSE as u32),
        );

        let angle_rect_rose = Rectangle::new(
            origin + Point::new(0, height - TEXT_HEIGHT_ROSE),
            Size::new(ANGLE_WIDTH_ROSE as u32, TEXT_HEIGHT_ROSE as u32),
        );
        let angle_rect_band = Rectangle::new(
            origin + Point::new(0, height - TEXT_HEIGHT_BAND),
            Size::new(ANGLE_WIDTH_BAND as u32, TEXT_HEIGHT_BAND as u32),
        );

        let pointer_x = width / 2 - 1;
        let pointer_rect_rose =
            Rectangle::new(origin + Point::new(pointer_x, 0), Size::new(POINTER_WIDTH, 20));
        let pointer_rect_band =
            Rectangle::new(origin + Point::new(pointer_x, 18), Size::new(POINTER_WIDTH, 40));

        let rose_frame = Rectangle::new(
            origin + Point::new(0, 8),
            Size::new(bounds.size.width, (height - 15) as u32),
        );

        Self {
            rose_frame,
            direction_rect_rose,
            direction_rect_band,
            angle_rect_rose,
            angle_rect_band,
            pointer_rect_rose,
            pointer_rect_band,
            shows_band: false,
            transition_factor: 0.0,
            band_animation: TransitionAnimation::idle(360),
        }
    }

    /// Blend factor between the rose (0) and band (1) arrangements.
    pub fn transition_factor(&self) -> f32 {
        self.transition_factor
    }

    /// Drive the blend directly, e.g. from the provider's orientation
    /// transition callback.
    pub fn set_transition_factor(&mut self, factor: f32) {
        self.transition_factor = factor.clamp(0.0, 1.0);
    }

    pub fn shows_band(&self) -> bool {
        self.shows_band
    }

    /// Toggle between rose and band with an eased slide.
    pub fn set_shows_band(&mut self, shows_band: bool) {
        if self.shows_band == shows_band {
            return;
        }
        self.shows_band = shows_band;
        let target = if shows_band { 1.0 } else { 0.0 };
        self.band_animation.restart(self.transition_factor, target);
    }

    /// Advance the band slide animation; returns the updated factor while it
    /// runs.
    pub fn advance(&mut self, dt_ms: u32) -> Option<f32> {
        let value = self.band_animation.advance(dt_ms)?;
        self.transition_factor = value;
        Some(value)
    }

    /// Compute this frame's geometry from the animated presentation angle.
    pub fn layout(&self, presentation_angle: Angle) -> CompassLayout {
        let f = self.transition_factor;
        let degrees = angle::to_degrees(presentation_angle);

        let mut angle_text = String::new();
        let _ = write!(angle_text, "{}\u{00B0}", degrees);

        let direction_index = ((degrees + 23) / 45) as usize % DIRECTIONS.len();

        CompassLayout {
            rose_angle: presentation_angle,
            angle_text,
            angle_rect: rect_blend(&self.angle_rect_rose, &self.angle_rect_band, f),
            direction_text: DIRECTIONS[direction_index],
            direction_rect: rect_blend(&self.direction_rect_rose, &self.direction_rect_band, f),
            pointer_rect: rect_blend(&self.pointer_rect_rose, &self.pointer_rect_band, f),
        }
    }

    /// Apply a button press, mutating the provider where needed.
    pub fn handle_button<O: DataProviderObserver>(
        &mut self,
        button: Button,
        provider: &mut DataProvider<O>,
    ) -> ButtonOutcome {
        match button {
            Button::Select => {
                let shows_band = self.shows_band;
                self.set_shows_band(!shows_band);
                ButtonOutcome::Handled
            }
            Button::Down => {
                provider.delta_target_angle(FULL_TURN / 5);
                ButtonOutcome::Handled
            }
            Button::Up => {
                // debug aid: nudge the blend without changing orientation
                self.set_transition_factor(self.transition_factor + 0.1);
                ButtonOutcome::Handled
            }
            Button::Back => ButtonOutcome::Ignored,
        }
    }

    /// Render one frame.
    pub fn draw<D>(
        &self,
        target: &mut D,
        presentation_angle: Angle,
        color: D::Color,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget,
    {
        let layout = self.layout(presentation_angle);

        draw_rose(target, self.rose_frame, layout.rose_angle, color, color)?;
        target.fill_solid(&layout.pointer_rect, color)?;

        let style = MonoTextStyle::new(&FONT_10X20, color);
        let angle_anchor = Point::new(
            layout.angle_rect.top_left.x + layout.angle_rect.size.width as i32,
            layout.angle_rect.center().y,
        );
        Text::with_alignment(&layout.angle_text, angle_anchor, style, Alignment::Right)
            .draw(target)?;

        Text::with_alignment(
            layout.direction_text,
            layout.direction_rect.center(),
            style,
            Alignment::Center,
        )
        .draw(target)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::from_degrees;

    fn screen() -> CompassScreen {
        CompassScreen::new(Rectangle::new(Point::zero(), Size::new(144, 168)))
    }

    #[test]
    fn test_angle_text_is_normalized_degrees() {
        let screen = screen();
        assert_eq!(screen.layout(from_degrees(134)).angle_text, "134\u{00B0}");
        assert_eq!(screen.layout(from_degrees(-90)).angle_text, "270\u{00B0}");
        assert_eq!(screen.layout(0).angle_text, "0\u{00B0}");
    }

    #[test]
    fn test_direction_label_quantizes_with_offset() {
        let screen = screen();
        assert_eq!(screen.layout(from_degrees(0)).direction_text, "N");
        assert_eq!(screen.layout(from_degrees(21)).direction_text, "N");
        assert_eq!(screen.layout(from_degrees(22)).direction_text, "NE");
        assert_eq!(screen.layout(from_degrees(90)).direction_text, "E");
        assert_eq!(screen.layout(from_degrees(134)).direction_text, "SE");
        assert_eq!(screen.layout(from_degrees(158)).direction_text, "S");
        assert_eq!(screen.layout(from_degrees(315)).direction_text, "NW");
        assert_eq!(screen.layout(from_degrees(338)).direction_text, "N");
    }

    #[test]
    fn test_layout_blends_between_rose_and_band() {
        let mut screen = screen();

        let rose = screen.layout(0);
        assert_eq!(rose.pointer_rect.top_left.y, 0);
        assert_eq!(rose.angle_rect.size.height, TEXT_HEIGHT_ROSE as u32);

        screen.set_transition_factor(1.0);
        let band = screen.layout(0);
        assert_eq!(band.pointer_rect.top_left.y, 18);
        assert_eq!(band.angle_rect.size.height, TEXT_HEIGHT_BAND as u32);

        screen.set_transition_factor(0.5);
        let mid = screen.layout(0);
        assert_eq!(mid.pointer_rect.top_left.y, 9);
    }

    #[test]
    fn test_layout_follows_window_origin() {
        let origin = Point::new(10, 20);
        let offset = CompassScreen::new(Rectangle::new(origin, Size::new(144, 168)));
        let at_zero = screen();

        let shifted = offset.layout(0);
        let base = at_zero.layout(0);
        assert_eq!(shifted.pointer_rect.top_left, base.pointer_rect.top_left + origin);
        assert_eq!(shifted.angle_rect.top_left, base.angle_rect.top_left + origin);
        assert_eq!(shifted.direction_rect.top_left, base.direction_rect.top_left + origin);
    }

    #[test]
    fn test_select_button_toggles_band_with_animation() {
        struct Quiet;
        impl DataProviderObserver for Quiet {}

        let mut screen = screen();
        let mut provider = DataProvider::new(Quiet);

        assert_eq!(
            screen.handle_button(Button::Select, &mut provider),
            ButtonOutcome::Handled
        );
        assert!(screen.shows_band());

        // slide runs to completion
        let mut last = 0.0;
        while let Some(value) = screen.advance(33) {
            last = value;
        }
        assert!((last - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_down_button_advances_target_by_fifth_turn() {
        struct Quiet;
        impl DataProviderObserver for Quiet {}

        let mut screen = screen();
        let mut provider = DataProvider::new(Quiet);

        screen.handle_button(Button::Down, &mut provider);
        assert_eq!(provider.target_angle(), FULL_TURN / 5);

        screen.handle_button(Button::Down, &mut provider);
        assert_eq!(provider.target_angle(), 2 * FULL_TURN / 5);
    }

    #[test]
    fn test_back_button_is_not_consumed() {
        struct Quiet;
        impl DataProviderObserver for Quiet {}

        let mut screen = screen();
        let mut provider = DataProvider::new(Quiet);
        assert_eq!(
            screen.handle_button(Button::Back, &mut provider),
            ButtonOutcome::Ignored
        );
    }
}
