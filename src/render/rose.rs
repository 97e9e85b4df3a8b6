//! Compass rose (ticks) rendering
//!
//! Thirty-two tick marks around the rim, longer at the cardinal and shorter
//! at the ordinal positions, a filled triangle for north, and the four
//! cardinal letters. The whole rose rotates with the presentation angle.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_9X15_BOLD;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Text};

use crate::angle::{self, Angle, FULL_TURN, QUARTER_TURN};
use crate::render::fill_polygon;

const TICK_COUNT: i32 = 32;
/// Half-width of the north triangle in angle units (~5 degrees).
const NORTH_TRIANGLE_HALF_ANGLE: Angle = FULL_TURN * 5 / 360;
const NORTH_TRIANGLE_DEPTH: i32 = 10;
const LETTER_MARGIN: i32 = 19;

/// Draw the rotating tick ring, north marker, and cardinal letters.
///
/// `rotation` is the presentation angle: the rose turns while the case (and
/// the needle housing) stays put.
pub fn draw_rose<D>(
    target: &mut D,
    bounds: Rectangle,
    rotation: Angle,
    color: D::Color,
    letter_color: D::Color,
) -> Result<(), D::Error>
where
    D: DrawTarget,
{
    let center = bounds.center();
    let rim_radius = (bounds.size.width.min(bounds.size.height) / 2) as i32;
    let stroke = PrimitiveStyle::with_stroke(color, 1);

    // tick marks; north is skipped to avoid flicker under the triangle
    for i in 1..TICK_COUNT {
        let tick_angle = rotation + FULL_TURN * i / TICK_COUNT;
        let length = match i % 4 {
            0 => 10,
            2 => 5,
            _ => 2,
        };

        let inner = angle::point_from_polar(center, tick_angle, rim_radius - length);
        let outer = angle::point_from_polar(center, tick_angle, rim_radius);
        Line::new(inner, outer).into_styled(stroke).draw(target)?;
    }

    // north triangle
    let north = [
        angle::point_from_polar(center, rotation, rim_radius),
        angle::point_from_polar(
            center,
            rotation + NORTH_TRIANGLE_HALF_ANGLE,
            rim_radius - NORTH_TRIANGLE_DEPTH,
        ),
        angle::point_from_polar(
            center,
            rotation - NORTH_TRIANGLE_HALF_ANGLE,
            rim_radius - NORTH_TRIANGLE_DEPTH,
        ),
    ];
    fill_polygon(target, &north, color)?;

    // cardinal letters ride along with the rotation
    let style = MonoTextStyle::new(&FONT_9X15_BOLD, letter_color);
    for (index, caption) in ["N", "E", "S", "W"].iter().enumerate() {
        let letter_angle = rotation + QUARTER_TURN * index as i32;
        let position = angle::point_from_polar(center, letter_angle, rim_radius - LETTER_MARGIN);
        Text::with_alignment(caption, position, style, Alignment::Center).draw(target)?;
    }

    Ok(())
}
