//! Wraparound-safe angle arithmetic on the fixed circular scale
//!
//! Headings, needle positions, and calibration segments all live on a single
//! integer scale of [`FULL_TURN`] units per revolution (the same scale the
//! original device's trigonometry tables used). Keeping angles integral makes
//! the simulation deterministic; conversion to radians happens only at the
//! drawing boundary.

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;
use nalgebra::ComplexField;

/// An angle on the fixed circular scale, `FULL_TURN` units per revolution.
pub type Angle = i32;

/// One full revolution.
pub const FULL_TURN: Angle = 0x10000;
/// Half a revolution.
pub const HALF_TURN: Angle = FULL_TURN / 2;
/// A quarter revolution.
pub const QUARTER_TURN: Angle = FULL_TURN / 4;

/// Normalize an angle into `[0, FULL_TURN)`.
pub fn wrap(angle: Angle) -> Angle {
    angle.rem_euclid(FULL_TURN)
}

/// Signed shortest-path difference `a - b`, normalized into
/// `(-HALF_TURN, HALF_TURN]`.
///
/// Plain subtraction would make a flip from 359 degrees to 1 degree spin the
/// needle the long way around; this always takes the short way.
pub fn shortest_delta(a: Angle, b: Angle) -> Angle {
    let mut delta = wrap(a) - wrap(b);
    if delta > HALF_TURN {
        delta -= FULL_TURN;
    } else if delta <= -HALF_TURN {
        delta += FULL_TURN;
    }
    delta
}

/// Convert degrees to angle units.
pub fn from_degrees(degrees: i32) -> Angle {
    ((degrees as i64 * FULL_TURN as i64) / 360) as Angle
}

/// Convert an angle to the nearest whole degree in `[0, 360)`.
pub fn to_degrees(angle: Angle) -> i32 {
    ((wrap(angle) * 360 + HALF_TURN) / FULL_TURN) % 360
}

/// Convert an angle to radians in `[0, 2*pi)`.
pub fn to_radians(angle: Angle) -> f32 {
    wrap(angle) as f32 / FULL_TURN as f32 * core::f32::consts::TAU
}

/// Convert radians to angle units.
pub fn from_radians(radians: f32) -> Angle {
    wrap((radians / core::f32::consts::TAU * FULL_TURN as f32) as Angle)
}

/// Round-to-nearest conversion; a plain `as i32` truncates toward zero and
/// puts points one pixel off right at the cardinal angles.
pub(crate) fn round_i32(value: f32) -> i32 {
    if value >= 0.0 {
        (value + 0.5) as i32
    } else {
        (value - 0.5) as i32
    }
}

/// Project a polar coordinate into screen space.
///
/// Angle 0 points up and increases clockwise; the y axis grows downward.
pub fn point_from_polar(center: Point, angle: Angle, radius: i32) -> Point {
    let rad = to_radians(angle);
    Point::new(
        center.x + round_i32(rad.sin() * radius as f32),
        center.y - round_i32(rad.cos() * radius as f32),
    )
}

/// Linear interpolation between two values, `f = 0` yields `a`.
pub fn blend(a: f32, b: f32, f: f32) -> f32 {
    a * (1.0 - f) + f * b
}

/// Linear interpolation between two integer values.
pub fn blend_i32(a: i32, b: i32, f: f32) -> i32 {
    (a as f32 * (1.0 - f) + f * b as f32) as i32
}

/// Componentwise interpolation between two layout rectangles.
///
/// Used to slide the text and pointer layers between their rose and band
/// positions as the transition factor animates.
pub fn rect_blend(a: &Rectangle, b: &Rectangle, f: f32) -> Rectangle {
    Rectangle::new(
        Point::new(
            blend_i32(a.top_left.x, b.top_left.x, f),
            blend_i32(a.top_left.y, b.top_left.y, f),
        ),
        Size::new(
            blend_i32(a.size.width as i32, b.size.width as i32, f) as u32,
            blend_i32(a.size.height as i32, b.size.height as i32, f) as u32,
        ),
    )
}
